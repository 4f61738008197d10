use std::sync::Arc;

use super::security_config::SecurityConfig;
use crate::auth::cookie::CookiePolicy;
use crate::auth::identity::IdentityDirectory;
use crate::config::env::RuntimeEnv;
use crate::store::DocumentStore;

/// Application state shared by every worker. Read-only after startup.
#[derive(Debug, Clone)]
pub struct AppState {
    pub runtime_env: RuntimeEnv,
    /// Signing secret and algorithm for session tokens
    pub security: SecurityConfig,
    /// Attributes for setting and clearing the session cookie
    pub cookies: CookiePolicy,
    /// Who may be issued a session
    pub identities: Arc<dyn IdentityDirectory>,
    /// Services and bookings collections
    pub store: Arc<dyn DocumentStore>,
}
