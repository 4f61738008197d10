use tracing_subscriber::{fmt, prelude::*, EnvFilter, Layer, Registry};

use crate::config::env::RuntimeEnv;

const DEFAULT_FILTER: &str = "info,actix_web=info,actix_server=warn";

/// Install the process-wide subscriber. Production emits one JSON object per
/// line with the current span's fields; other environments get compact text.
/// `RUST_LOG` overrides [`DEFAULT_FILTER`].
pub fn init_tracing(runtime_env: RuntimeEnv) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let fmt_layer: Box<dyn Layer<Registry> + Send + Sync> = if runtime_env.is_production() {
        fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .with_target(true)
            .with_ansi(false)
            .boxed()
    } else {
        fmt::layer().compact().with_target(true).boxed()
    };

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter)
        .init();
}
