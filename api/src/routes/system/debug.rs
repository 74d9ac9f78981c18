use actix_web::{web, HttpRequest, HttpResponse};

use ag_core::repositories::RevocationStore;
use ag_core::services::{CredentialValidator, TokenCodec};

use crate::cookies::read_token;
use crate::dto::{DebugTokensResponse, TokenInspection};
use crate::handlers::error::not_found;
use crate::state::AppState;

/// Handler for GET /debug/tokens
///
/// Shows the raw session cookies and what they decode to. Only mounted
/// when debug endpoints are enabled, and even then answers `404` outside
/// development and testing.
pub async fn debug_tokens<S, V>(req: HttpRequest, state: web::Data<AppState<S, V>>) -> HttpResponse
where
    S: RevocationStore + 'static,
    V: CredentialValidator + 'static,
{
    if !state.config.debug_endpoints_enabled() {
        tracing::warn!(
            environment = %state.config.environment,
            "Debug endpoint called where it is not allowed"
        );
        return not_found().await;
    }
    tracing::warn!("Serving raw session tokens from the debug endpoint");

    let codec = state.token_service.codec();
    let cookies = &state.config.cookies;
    HttpResponse::Ok().json(DebugTokensResponse {
        access_token: read_token(&req, &cookies.access_name).map(|raw| inspect(codec, raw)),
        refresh_token: read_token(&req, &cookies.refresh_name).map(|raw| inspect(codec, raw)),
    })
}

fn inspect(codec: &TokenCodec, raw: String) -> TokenInspection {
    match codec.decode_ignoring_expiry(&raw) {
        Ok(claims) => TokenInspection {
            raw,
            claims: Some(claims),
            error: None,
        },
        Err(e) => TokenInspection {
            raw,
            claims: None,
            error: Some(e.to_string()),
        },
    }
}
