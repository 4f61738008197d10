//! Identity claims carried inside session tokens.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::logging::pii::is_valid_email;

/// Registered claim names the server owns. Callers cannot set them.
pub const RESERVED_CLAIMS: &[&str] = &["iat", "exp", "nbf", "jti"];

/// Caller-asserted identity attributes. `email` is mandatory; anything else
/// the client sends is carried through verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityClaim {
    pub email: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl IdentityClaim {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            extra: Map::new(),
        }
    }

    /// Build a claim from a login body.
    ///
    /// Fails with `INVALID_EMAIL` when `email` is missing, not a string or not
    /// an address. Reserved claim names are dropped.
    pub fn from_body(mut body: Map<String, Value>) -> Result<Self, AppError> {
        let email = match body.remove("email") {
            Some(Value::String(email)) => email.trim().to_string(),
            _ => {
                return Err(AppError::invalid(
                    ErrorCode::InvalidEmail,
                    "email is required",
                ))
            }
        };

        if !is_valid_email(&email) {
            return Err(AppError::invalid(
                ErrorCode::InvalidEmail,
                "email is not a valid address",
            ));
        }

        let mut claim = Self { email, extra: body };
        claim.strip_reserved();
        Ok(claim)
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub(crate) fn strip_reserved(&mut self) {
        for name in RESERVED_CLAIMS {
            self.extra.remove(*name);
        }
    }
}

/// Decoded session token: the identity plus issuance metadata.
///
/// Inserted into request extensions by `RequireSession`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(flatten)]
    pub identity: IdentityClaim,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}
