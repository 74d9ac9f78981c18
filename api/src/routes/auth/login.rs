use actix_web::{web, HttpResponse};
use validator::Validate;

use ag_core::errors::DomainError;
use ag_core::repositories::RevocationStore;
use ag_core::services::{CredentialValidator, Credentials};

use crate::dto::LoginRequest;
use crate::handlers::error::handle_domain_error;
use crate::state::AppState;

use super::session_response;

/// Handler for POST /login
///
/// Checks the credentials with the user service and opens a new session.
///
/// # Request Body
///
/// ```json
/// { "username": "string", "password": "string" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// Sets the access and refresh cookies and returns the same pair:
/// ```json
/// {
///     "access_token": "eyJ...",
///     "refresh_token": "eyJ...",
///     "token_type": "Bearer",
///     "session_id": "...",
///     "access_expires_in": 900,
///     "refresh_expires_in": 604800
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Missing username or password
/// - 401 Unauthorized: Credentials rejected
/// - 503 Service Unavailable: User service unreachable
pub async fn login<S, V>(
    state: web::Data<AppState<S, V>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    S: RevocationStore + 'static,
    V: CredentialValidator + 'static,
{
    let request = request.into_inner().normalized();
    if let Err(errors) = request.validate() {
        let mut fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|k| k.to_string())
            .collect();
        fields.sort_unstable();
        tracing::debug!(?fields, "Rejected login request");
        return handle_domain_error(&DomainError::Validation {
            message: format!("invalid or missing fields: {}", fields.join(", ")),
        });
    }

    let credentials = Credentials::new(request.username, request.password);
    let subject = match state.validator.validate(&credentials).await {
        Ok(subject) => subject,
        Err(error) => return handle_domain_error(&error),
    };

    match state.token_service.issue_session(&subject).await {
        Ok(issued) => session_response(&state.config.cookies, &issued),
        Err(error) => handle_domain_error(&error),
    }
}
