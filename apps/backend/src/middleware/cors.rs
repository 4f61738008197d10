use actix_cors::Cors;
use actix_web::http::header;

const DEFAULT_ORIGINS: &[&str] = &["http://localhost:5173", "http://localhost:3000"];

/// Build CORS middleware for a browser client on another origin.
///
/// Credentials are allowed so the session cookie travels with cross-origin
/// requests; that requires an explicit origin list, never a wildcard.
/// `allowed_raw` is the comma-separated `CORS_ALLOWED_ORIGINS` value.
pub fn cors_middleware(allowed_raw: Option<&str>) -> Cors {
    let allowed_origins: Vec<String> = allowed_raw
        .unwrap_or_default()
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty() && *s != "null")
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .map(|s| s.trim_end_matches('/').to_string())
        .collect();

    let effective_origins: Vec<String> = if allowed_origins.is_empty() {
        DEFAULT_ORIGINS.iter().map(|s| s.to_string()).collect()
    } else {
        allowed_origins
    };

    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers(vec![
            header::HeaderName::from_static("x-trace-id"),
            header::HeaderName::from_static("x-request-id"),
        ])
        .supports_credentials()
        .max_age(3600);

    for origin in effective_origins {
        cors = cors.allowed_origin(&origin);
    }

    cors
}
