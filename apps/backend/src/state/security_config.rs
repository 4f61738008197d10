use jsonwebtoken::Algorithm;
use uuid::Uuid;

/// Signing configuration shared by the token issuer and verifier.
///
/// Built once at startup and handed to both through `AppState`.
#[derive(Clone)]
pub struct SecurityConfig {
    /// HMAC secret for signing and verifying session tokens
    pub jwt_secret: Vec<u8>,
    /// JWT algorithm to use (defaults to HS256)
    pub algorithm: Algorithm,
}

impl SecurityConfig {
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS256,
        }
    }

    /// Random per-process secret. Tokens signed with it do not survive a
    /// restart; used when no secret is wired in (tests, tooling).
    pub fn ephemeral() -> Self {
        let secret = format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple());
        Self::new(secret.into_bytes())
    }
}

impl std::fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("jwt_secret", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .finish()
    }
}
