//! Error codes for the Bug Shield backend API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! Every code is SCREAMING_SNAKE_CASE and maps 1:1 to the string that
//! appears in the `code` field of an error body.

use core::fmt;

/// Centralized error codes for the Bug Shield backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication & Authorization
    /// No valid session (missing, tampered or expired cookie)
    Unauthorized,
    /// Authenticated, but not allowed to touch this resource
    Forbidden,
    /// Identity claim not present in the identity directory
    EmailNotAllowed,

    // Request Validation
    /// Missing or malformed email in an identity claim
    InvalidEmail,
    /// Request body is not a JSON object
    InvalidDocument,

    // Resource Not Found
    /// Service document not found
    ServiceNotFound,

    // System Errors
    /// Document store failure
    StoreError,
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::EmailNotAllowed => "EMAIL_NOT_ALLOWED",

            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidDocument => "INVALID_DOCUMENT",

            Self::ServiceNotFound => "SERVICE_NOT_FOUND",

            Self::StoreError => "STORE_ERROR",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
