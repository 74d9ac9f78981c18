//! CORS middleware configuration for cross-origin requests.
//!
//! Browsers send the session cookies cross-origin only when the response
//! allows credentials, so both profiles support credentials. Outside
//! production any origin is reflected; in production only the origins
//! listed in `ALLOWED_ORIGINS` are.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use ag_shared::AppConfig;

const PREFLIGHT_MAX_AGE_SECS: usize = 3600;

/// Creates a CORS middleware instance for the configured environment.
pub fn create_cors(config: &AppConfig) -> Cors {
    if config.environment.is_production() {
        create_production_cors(&config.server.allowed_origins)
    } else {
        create_development_cors()
    }
}

fn create_development_cors() -> Cors {
    tracing::info!("Configuring permissive CORS");

    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
            header::HeaderName::from_static("x-requested-with"),
        ])
        .expose_headers(vec![header::HeaderName::from_static("x-request-id")])
        .max_age(PREFLIGHT_MAX_AGE_SECS)
        .supports_credentials()
}

fn create_production_cors(allowed_origins: &[String]) -> Cors {
    tracing::info!(origins = allowed_origins.len(), "Configuring production CORS");

    let mut cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .expose_headers(vec![header::HeaderName::from_static("x-request-id")])
        .max_age(PREFLIGHT_MAX_AGE_SECS)
        .supports_credentials();

    // "*" cannot be combined with credentials
    for origin in allowed_origins.iter().filter(|o| o.as_str() != "*") {
        tracing::info!(origin = %origin, "Adding allowed origin");
        cors = cors.allowed_origin(origin);
    }

    cors
}
