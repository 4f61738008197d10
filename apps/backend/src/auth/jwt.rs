use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::auth::claims::{Claims, IdentityClaim};
use crate::auth::{AuthError, InvalidReason};
use crate::error::AppError;
use crate::state::security_config::SecurityConfig;

/// Lifetime of a session token, in seconds.
pub const TOKEN_TTL_SECS: i64 = 60 * 60;

/// Sign `claim` into a token that expires [`TOKEN_TTL_SECS`] after `now`.
///
/// The claim is not checked here; callers gate issuance on the identity
/// directory.
pub fn issue_token(
    claim: &IdentityClaim,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    let iat = now
        .duration_since(UNIX_EPOCH)
        .map_err(|_| AppError::internal("Failed to get current time"))?
        .as_secs() as i64;

    let mut identity = claim.clone();
    identity.strip_reserved();

    let claims = Claims {
        identity,
        iat,
        exp: iat + TOKEN_TTL_SECS,
    };

    encode(
        &Header::new(security.algorithm),
        &claims,
        &EncodingKey::from_secret(&security.jwt_secret),
    )
    .map_err(|e| AppError::internal(format!("Failed to encode JWT: {e}")))
}

/// Verify signature and expiry of `token` and return its claims.
pub fn verify_token(token: &str, security: &SecurityConfig) -> Result<Claims, AuthError> {
    if token.is_empty() {
        return Err(AuthError::Missing);
    }

    // Algorithm pinned; exp required; no grace period past expiry.
    let mut validation = Validation::new(security.algorithm);
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(&security.jwt_secret),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AuthError::Invalid(InvalidReason::Expired),
        ErrorKind::InvalidSignature => AuthError::Invalid(InvalidReason::BadSignature),
        _ => AuthError::Invalid(InvalidReason::Malformed),
    })
}
