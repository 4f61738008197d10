#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod auth;
pub mod config;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod infra;
pub mod logging;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod store;
pub mod telemetry;
pub mod trace_ctx;

// Re-exports for public API
pub use auth::{issue_token, verify_token, Claims, IdentityClaim};
pub use config::Config;
pub use error::AppError;
pub use errors::ErrorCode;
pub use extractors::current_identity::CurrentIdentity;
pub use middleware::cors::cors_middleware;
pub use middleware::request_trace::RequestTrace;
pub use middleware::require_session::RequireSession;
pub use middleware::structured_logger::StructuredLogger;
pub use middleware::trace_span::TraceSpan;
pub use state::app_state::AppState;
pub use state::security_config::SecurityConfig;
pub use store::{DocumentStore, InMemoryStore};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    bugshield_test_support::logging::init();
}
