use actix_web::{web, App, HttpServer};
use bugshield::config::Config;
use bugshield::infra::state::StateBuilder;
use bugshield::middleware::cors::cors_middleware;
use bugshield::middleware::request_trace::RequestTrace;
use bugshield::middleware::structured_logger::StructuredLogger;
use bugshield::middleware::trace_span::TraceSpan;
use bugshield::routes;
use bugshield::telemetry;
use tracing::info;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Environment variables must be set by the runtime environment:
    // - Docker: docker-compose env_file or docker run --env-file
    // - Local dev: source an env file (e.g., set -a; . ./.env; set +a)
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    telemetry::init_tracing(config.runtime_env);

    let app_state = match StateBuilder::from_config(&config).build() {
        Ok(state) => state,
        Err(e) => {
            eprintln!("❌ Failed to build application state: {e}");
            std::process::exit(1);
        }
    };

    info!(
        host = %config.host,
        port = config.port,
        runtime_env = ?config.runtime_env,
        "🚀 Starting bug shield backend"
    );

    // Wrap AppState with web::Data before passing to HttpServer
    let data = web::Data::new(app_state);
    let cors_origins = config.cors_allowed_origins.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware(cors_origins.as_deref()))
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
