use actix_web::error::JsonPayloadError;
use actix_web::{web, HttpRequest};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::email_allowlist::normalize_email;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::current_identity::CurrentIdentity;

pub mod auth;
pub mod bookings;
pub mod health;
pub mod services;

/// Acknowledgement body for session endpoints.
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// `?email=` selector of the per-user listings.
#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    pub email: Option<String>,
}

impl EmailQuery {
    /// The email a listing is scoped to. Defaults to the caller's own; asking
    /// for anyone else's is forbidden.
    pub fn resolve(&self, identity: &CurrentIdentity) -> Result<String, AppError> {
        let own = identity.email();
        match self.email.as_deref().map(str::trim) {
            None | Some("") => Ok(own.to_string()),
            Some(requested) if normalize_email(requested) == normalize_email(own) => {
                Ok(own.to_string())
            }
            Some(_) => Err(AppError::forbidden("forbidden access")),
        }
    }
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected request body");
    AppError::invalid(
        ErrorCode::InvalidDocument,
        "request body must be a JSON object",
    )
    .into()
}

/// Register every route plus shared extractor configuration.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .configure(health::configure_routes)
        .configure(auth::configure_routes)
        .configure(services::configure_routes)
        .configure(bookings::configure_routes);
}
