use std::sync::Arc;

use tracing::warn;

use crate::auth::cookie::CookiePolicy;
use crate::auth::identity::{IdentityDirectory, OpenDirectory};
use crate::config::app::Config;
use crate::config::env::RuntimeEnv;
use crate::error::AppError;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;
use crate::store::{DocumentStore, InMemoryStore};

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    runtime_env: RuntimeEnv,
    security_config: Option<SecurityConfig>,
    identities: Option<Arc<dyn IdentityDirectory>>,
    store: Option<Arc<dyn DocumentStore>>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            runtime_env: RuntimeEnv::default(),
            security_config: None,
            identities: None,
            store: None,
        }
    }

    /// Seed the builder from loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        let mut builder = Self::new()
            .with_env(config.runtime_env)
            .with_security(SecurityConfig::new(config.jwt_secret.as_bytes()));
        if let Some(allowlist) = &config.email_allowlist {
            builder = builder.with_identities(allowlist.clone());
        }
        builder
    }

    pub fn with_env(mut self, runtime_env: RuntimeEnv) -> Self {
        self.runtime_env = runtime_env;
        self
    }

    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = Some(security_config);
        self
    }

    pub fn with_identities(mut self, directory: impl IdentityDirectory + 'static) -> Self {
        self.identities = Some(Arc::new(directory));
        self
    }

    pub fn with_store(mut self, store: Arc<dyn DocumentStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn build(self) -> Result<AppState, AppError> {
        let identities = match self.identities {
            Some(directory) => directory,
            None if self.runtime_env.is_production() => {
                return Err(AppError::config(
                    "an identity directory is required in production",
                ))
            }
            None => {
                warn!(
                    runtime_env = ?self.runtime_env,
                    "no identity directory configured; any well-formed email may log in"
                );
                Arc::new(OpenDirectory)
            }
        };

        let security = match self.security_config {
            Some(security) => security,
            None if self.runtime_env.is_production() => {
                return Err(AppError::config("a signing secret is required in production"))
            }
            None => SecurityConfig::ephemeral(),
        };

        Ok(AppState {
            runtime_env: self.runtime_env,
            security,
            cookies: CookiePolicy::for_env(self.runtime_env),
            identities,
            store: self
                .store
                .unwrap_or_else(|| Arc::new(InMemoryStore::new())),
        })
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
