//! Shared error codes and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Standard error response structure used across all API endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for client identification
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Error codes returned in the `error` field
///
/// Each token failure kind has its own code so a client can tell an
/// expired token (refresh and retry) from a tampered one (sign in again).
pub mod error_codes {
    pub const TOKEN_MISSING: &str = "token_missing";
    pub const TOKEN_MALFORMED: &str = "token_malformed";
    pub const TOKEN_INVALID_SIGNATURE: &str = "token_invalid_signature";
    pub const TOKEN_EXPIRED: &str = "token_expired";
    pub const TOKEN_WRONG_TYPE: &str = "token_wrong_type";
    pub const TOKEN_REVOKED: &str = "token_revoked";
    pub const TOKEN_REUSE_DETECTED: &str = "token_reuse_detected";
    pub const AUTHENTICATION_UNAVAILABLE: &str = "authentication_unavailable";
    pub const INVALID_CREDENTIALS: &str = "invalid_credentials";
    pub const IDENTITY_SERVICE_UNAVAILABLE: &str = "identity_service_unavailable";
    pub const VALIDATION_ERROR: &str = "validation_error";
    pub const NOT_FOUND: &str = "not_found";
    pub const INTERNAL_ERROR: &str = "internal_error";
}
