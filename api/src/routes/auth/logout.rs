use actix_web::{web, HttpRequest, HttpResponse};

use ag_core::repositories::RevocationStore;
use ag_core::services::CredentialValidator;

use crate::cookies::removal_cookies;
use crate::dto::{MessageResponse, RefreshTokenRequest};
use crate::state::AppState;

use super::presented_refresh_token;

/// Handler for POST /logout
///
/// Revokes the presented refresh token and its session. Always answers
/// `200` and clears both cookies, whether or not a usable token came
/// with the request.
pub async fn logout<S, V>(
    req: HttpRequest,
    state: web::Data<AppState<S, V>>,
    body: Option<web::Json<RefreshTokenRequest>>,
) -> HttpResponse
where
    S: RevocationStore + 'static,
    V: CredentialValidator + 'static,
{
    let cookies = &state.config.cookies;
    let token = presented_refresh_token(&req, body, cookies);

    let outcome = state.token_service.logout(token.as_deref()).await;
    tracing::debug!(?outcome, "Logout handled");

    let mut response = HttpResponse::Ok();
    for cookie in removal_cookies(cookies) {
        response.cookie(cookie);
    }
    response.json(MessageResponse {
        message: "Logged out".to_string(),
    })
}
