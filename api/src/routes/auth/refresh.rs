use actix_web::{web, HttpRequest, HttpResponse};

use ag_core::errors::{DomainError, TokenError};
use ag_core::repositories::RevocationStore;
use ag_core::services::CredentialValidator;

use crate::cookies::removal_cookies;
use crate::dto::RefreshTokenRequest;
use crate::handlers::error::error_body;
use crate::state::AppState;

use super::{presented_refresh_token, session_response};

/// Handler for POST /refresh
///
/// Rotates the refresh token (from the refresh cookie, or the body
/// `{"refresh_token": "..."}`) into a new pair under the same session.
///
/// # Response
///
/// ## Success (200 OK)
/// New cookies and the same body as `/login`.
///
/// ## Errors
/// - 401 Unauthorized: with the specific `error` code. Unless the cause is
///   an unreachable revocation store, both cookies are cleared since the
///   presented token can never succeed again.
pub async fn refresh<S, V>(
    req: HttpRequest,
    state: web::Data<AppState<S, V>>,
    body: Option<web::Json<RefreshTokenRequest>>,
) -> HttpResponse
where
    S: RevocationStore + 'static,
    V: CredentialValidator + 'static,
{
    let cookies = &state.config.cookies;
    let token = presented_refresh_token(&req, body, cookies).unwrap_or_default();

    match state.token_service.refresh(&token).await {
        Ok(issued) => session_response(cookies, &issued),
        Err(error) => {
            let (status, body) = error_body(&error);
            tracing::debug!(error = %error, "Refresh rejected");

            let mut response = HttpResponse::build(status);
            if clears_cookies(&error) {
                for cookie in removal_cookies(cookies) {
                    response.cookie(cookie);
                }
            }
            response.json(body)
        }
    }
}

/// A store outage is transient; the stored token may still be good.
fn clears_cookies(error: &DomainError) -> bool {
    !matches!(error.token_error(), Some(TokenError::StoreUnavailable))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_store_outage_keeps_cookies() {
        assert!(!clears_cookies(&TokenError::StoreUnavailable.into()));
        assert!(clears_cookies(&TokenError::TokenReuse.into()));
        assert!(clears_cookies(&TokenError::Expired.into()));
        assert!(clears_cookies(&TokenError::Missing.into()));
    }
}
