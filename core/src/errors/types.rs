//! Error kinds for the token lifecycle and the credential boundary
//!
//! Every token failure keeps its specific kind all the way to the HTTP
//! layer: an expired token tells the caller to refresh, a bad signature
//! tells it to sign in again.

use thiserror::Error;

use crate::domain::entities::token::TokenType;

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// No token was presented
    #[error("Token missing")]
    Missing,

    /// The token could not be parsed or carries unusable claims
    #[error("Malformed token")]
    Malformed,

    /// The signature does not verify against any known key
    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Token expired")]
    Expired,

    /// A token of one type was presented where the other is required
    #[error("Wrong token type: expected {expected}, found {found}")]
    WrongTokenType { expected: TokenType, found: TokenType },

    #[error("Token revoked")]
    Revoked,

    /// A refresh token that was already rotated out was presented again
    #[error("Refresh token reuse detected")]
    TokenReuse,

    /// The revocation store could not be consulted in time
    #[error("Revocation store unavailable")]
    StoreUnavailable,

    #[error("Token generation failed")]
    GenerationFailed,
}

/// Credential validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Identity service unavailable")]
    IdentityServiceUnavailable,
}
