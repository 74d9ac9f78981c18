//! Application factory
//!
//! Builds the actix-web `App` from the shared state. The binary calls it
//! once per worker and the integration tests call it directly.

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    error::InternalError,
    web, App, Error,
};
use tracing_actix_web::TracingLogger;

use ag_core::errors::DomainError;
use ag_core::repositories::RevocationStore;
use ag_core::services::CredentialValidator;

use crate::handlers::error::{handle_domain_error, not_found};
use crate::middleware::{create_cors, AccessGuard, AccessVerifier, SecurityHeaders};
use crate::routes::auth::{login, logout, refresh, verify};
use crate::routes::system::{debug_tokens, health, public_config, version};
use crate::state::AppState;

const JSON_BODY_LIMIT: usize = 16 * 1024;

/// Create and configure the application with all dependencies
pub fn create_app<S, V>(
    app_state: web::Data<AppState<S, V>>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    S: RevocationStore + 'static,
    V: CredentialValidator + 'static,
{
    let config = Arc::clone(&app_state.config);
    let verifier: Arc<dyn AccessVerifier> = app_state.token_service.clone();
    let access_guard = AccessGuard::new(verifier, &config.cookies.access_name);
    let debug_routes = config.debug.enable_endpoints;

    App::new()
        .app_data(app_state)
        .app_data(json_config())
        // Middleware order: the last one wrapped runs first
        .wrap(SecurityHeaders::new(config.environment))
        .wrap(create_cors(&config))
        .wrap(TracingLogger::default())
        // Session lifecycle
        .route("/login", web::post().to(login::<S, V>))
        .service(
            web::resource("/verify")
                .wrap(access_guard)
                .route(web::get().to(verify)),
        )
        .route("/refresh", web::post().to(refresh::<S, V>))
        .route("/logout", web::post().to(logout::<S, V>))
        // Introspection
        .route("/health", web::get().to(health::<S, V>))
        .route("/version", web::get().to(version))
        .route("/config", web::get().to(public_config::<S, V>))
        .configure(|cfg| {
            if debug_routes {
                tracing::warn!("Debug endpoints are mounted");
                cfg.route("/debug/tokens", web::get().to(debug_tokens::<S, V>));
            }
        })
        .default_service(web::route().to(not_found))
}

/// JSON bodies that fail to parse answer with a `validation_error`
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_BODY_LIMIT)
        .error_handler(|err, _req| {
            let response = handle_domain_error(&DomainError::Validation {
                message: err.to_string(),
            });
            InternalError::from_response(err, response).into()
        })
}
