//! Deployment environment selection.

/// Which deployment the process runs in. Drives cookie transport policy and
/// how strictly the identity directory must be configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuntimeEnv {
    Prod,
    #[default]
    Dev,
    Test,
}

impl RuntimeEnv {
    /// Parse the `RUNTIME_ENV` value. Unknown or empty values mean `Dev`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => RuntimeEnv::Prod,
            "test" => RuntimeEnv::Test,
            _ => RuntimeEnv::Dev,
        }
    }

    pub fn is_production(self) -> bool {
        self == RuntimeEnv::Prod
    }
}
