//! Centralized application configuration loaded from environment variables.
//!
//! Everything the process needs is read once here and then injected; no
//! other module reads the environment.

use std::env;

use crate::config::email_allowlist::EmailAllowlist;
use crate::config::env::RuntimeEnv;
use crate::error::AppError;

/// Minimum accepted length of `BACKEND_JWT_SECRET`, in bytes.
pub const MIN_SECRET_LEN: usize = 32;

const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone)]
pub struct Config {
    // Server configuration
    pub host: String,
    pub port: u16,
    pub runtime_env: RuntimeEnv,

    // Security configuration
    pub jwt_secret: String,

    // Identity directory (None = not configured)
    pub email_allowlist: Option<EmailAllowlist>,

    // Comma-separated browser origins allowed to send credentials
    pub cors_allowed_origins: Option<String>,
}

impl Config {
    /// Load and validate all configuration from the process environment.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("BACKEND_HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let port = match lookup("BACKEND_PORT").or_else(|| lookup("PORT")) {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| {
                AppError::config(format!("BACKEND_PORT must be a valid port number, got '{raw}'"))
            })?,
            None => DEFAULT_PORT,
        };

        let runtime_env = lookup("RUNTIME_ENV")
            .map(|v| RuntimeEnv::parse(&v))
            .unwrap_or_default();

        let jwt_secret = match lookup("BACKEND_JWT_SECRET") {
            Some(secret) if secret.len() >= MIN_SECRET_LEN => secret,
            Some(_) => {
                return Err(AppError::config(format!(
                    "BACKEND_JWT_SECRET is too short. It should be at least {MIN_SECRET_LEN} characters."
                )))
            }
            None => return Err(AppError::config("BACKEND_JWT_SECRET must be set.")),
        };

        let email_allowlist = lookup("ALLOWED_EMAILS").and_then(|raw| EmailAllowlist::parse(&raw));
        if email_allowlist.is_none() && runtime_env.is_production() {
            return Err(AppError::config(
                "ALLOWED_EMAILS must be set when RUNTIME_ENV=prod.",
            ));
        }

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS");

        Ok(Config {
            host,
            port,
            runtime_env,
            jwt_secret,
            email_allowlist,
            cors_allowed_origins,
        })
    }
}
