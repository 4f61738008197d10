pub mod app;
pub mod email_allowlist;
pub mod env;

pub use app::Config;
pub use email_allowlist::EmailAllowlist;
pub use env::RuntimeEnv;
