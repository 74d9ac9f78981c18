use actix_web::{web, HttpResponse};

use ag_core::repositories::RevocationStore;
use ag_core::services::CredentialValidator;

use crate::dto::VersionResponse;
use crate::state::AppState;

/// Handler for GET /version
pub async fn version() -> HttpResponse {
    HttpResponse::Ok().json(VersionResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Handler for GET /config
///
/// Signing secrets never leave the process; only their key ids do, and
/// URLs have their credentials masked.
pub async fn public_config<S, V>(state: web::Data<AppState<S, V>>) -> HttpResponse
where
    S: RevocationStore + 'static,
    V: CredentialValidator + 'static,
{
    HttpResponse::Ok().json(state.config.public_view())
}
