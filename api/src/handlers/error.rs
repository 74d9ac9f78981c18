//! Mapping of domain failures onto HTTP responses
//!
//! Every token failure kind gets its own `error` code. All of them answer
//! `401`, including a revocation store that cannot be reached: the gateway
//! rejects rather than admits when it cannot tell.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};

use ag_core::errors::{AuthError, DomainError, TokenError};
use ag_shared::{error_codes, ErrorResponse};

/// Status and body for a domain error
pub fn error_body(error: &DomainError) -> (StatusCode, ErrorResponse) {
    let (status, code, message) = match error {
        DomainError::Token(token_error) => token_error_parts(token_error),
        DomainError::Auth(AuthError::InvalidCredentials) => (
            StatusCode::UNAUTHORIZED,
            error_codes::INVALID_CREDENTIALS,
            "Invalid username or password".to_string(),
        ),
        DomainError::Auth(AuthError::IdentityServiceUnavailable) => (
            StatusCode::SERVICE_UNAVAILABLE,
            error_codes::IDENTITY_SERVICE_UNAVAILABLE,
            "Identity service is temporarily unavailable".to_string(),
        ),
        DomainError::Validation { message } => (
            StatusCode::BAD_REQUEST,
            error_codes::VALIDATION_ERROR,
            message.clone(),
        ),
        DomainError::Internal { .. } | DomainError::Store { .. } => internal(),
    };
    (status, ErrorResponse::new(code, message))
}

fn token_error_parts(error: &TokenError) -> (StatusCode, &'static str, String) {
    let code = match error {
        TokenError::Missing => error_codes::TOKEN_MISSING,
        TokenError::Malformed => error_codes::TOKEN_MALFORMED,
        TokenError::InvalidSignature => error_codes::TOKEN_INVALID_SIGNATURE,
        TokenError::Expired => error_codes::TOKEN_EXPIRED,
        TokenError::WrongTokenType { .. } => error_codes::TOKEN_WRONG_TYPE,
        TokenError::Revoked => error_codes::TOKEN_REVOKED,
        TokenError::TokenReuse => error_codes::TOKEN_REUSE_DETECTED,
        TokenError::StoreUnavailable => error_codes::AUTHENTICATION_UNAVAILABLE,
        TokenError::GenerationFailed => return internal(),
    };
    (StatusCode::UNAUTHORIZED, code, error.to_string())
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        error_codes::INTERNAL_ERROR,
        "An internal server error occurred".to_string(),
    )
}

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    let (status, body) = error_body(error);
    if status.is_server_error() {
        tracing::error!(error = %error, "Request failed");
    } else {
        tracing::debug!(error = %error, status = status.as_u16(), "Request rejected");
    }
    HttpResponse::build(status).json(body)
}

/// Default handler for unknown routes
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}

/// Domain error usable as an actix error, for extractors
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub DomainError);

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        error_body(&self.0).0
    }

    fn error_response(&self) -> HttpResponse {
        handle_domain_error(&self.0)
    }
}
