use std::collections::HashMap;
use std::time::Instant;

use actix_web::{web, HttpResponse};

use ag_core::repositories::RevocationStore;
use ag_core::services::CredentialValidator;
use ag_shared::{HealthResponse, ServiceHealth};

use crate::state::AppState;

pub const SERVICE_NAME: &str = "auth-gateway";

/// Handler for GET /health
///
/// Always `200`; an unreachable revocation store shows up as a `degraded`
/// status. The signing check mints and reads back a token with the
/// current key. The user service is not probed.
pub async fn health<S, V>(state: web::Data<AppState<S, V>>) -> HttpResponse
where
    S: RevocationStore + 'static,
    V: CredentialValidator + 'static,
{
    let service = &state.token_service;
    let started = Instant::now();
    let store = match tokio::time::timeout(
        service.config().store_timeout,
        service.store().health_check(),
    )
    .await
    {
        Ok(Ok(true)) => ServiceHealth::healthy(started.elapsed().as_millis() as u64),
        Ok(Ok(false)) => ServiceHealth::unhealthy("unexpected health check reply"),
        Ok(Err(e)) => ServiceHealth::unhealthy(e.to_string()),
        Err(_) => ServiceHealth::unhealthy("health check timed out"),
    };
    if store.message.is_some() {
        tracing::warn!(message = ?store.message, "Revocation store is unhealthy");
    }

    let started = Instant::now();
    let signing = match service.codec().self_check() {
        Ok(()) => ServiceHealth::healthy(started.elapsed().as_millis() as u64),
        Err(e) => {
            tracing::error!(error = %e, "Signing key self-check failed");
            ServiceHealth::unhealthy(e.to_string())
        }
    };

    let mut checks = HashMap::new();
    checks.insert("signing_keys".to_string(), signing);
    checks.insert("revocation_store".to_string(), store);

    HttpResponse::Ok().json(HealthResponse::from_checks(
        SERVICE_NAME,
        env!("CARGO_PKG_VERSION"),
        checks,
    ))
}
