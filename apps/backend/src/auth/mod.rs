//! Session credentials: issuance, verification and cookie transport.

pub mod claims;
pub mod cookie;
pub mod identity;
pub mod jwt;

use thiserror::Error;

use crate::error::AppError;

pub use claims::{Claims, IdentityClaim};
pub use cookie::{CookiePolicy, SESSION_COOKIE};
pub use identity::{IdentityDirectory, OpenDirectory};
pub use jwt::{issue_token, verify_token, TOKEN_TTL_SECS};

/// Why a verification attempt failed. Logged, never shown to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    Expired,
    BadSignature,
    Malformed,
    UnknownIdentity,
}

impl InvalidReason {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Expired => "token_expired",
            Self::BadSignature => "invalid_signature",
            Self::Malformed => "invalid_token",
            Self::UnknownIdentity => "unknown_identity",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("session cookie missing")]
    Missing,
    #[error("session token rejected: {}", .0.as_str())]
    Invalid(InvalidReason),
}

impl AuthError {
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::Missing => "cookie_missing",
            Self::Invalid(reason) => reason.as_str(),
        }
    }
}

/// Both variants collapse into the same 401.
impl From<AuthError> for AppError {
    fn from(_: AuthError) -> Self {
        AppError::unauthorized()
    }
}
