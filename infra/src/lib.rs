//! # Infrastructure Layer
//!
//! Concrete implementations of the core's boundaries:
//! - **Cache**: Redis client and the Redis-backed revocation store
//! - **Identity**: HTTP client for the user service that validates credentials

/// Cache module - Redis client and revocation store
pub mod cache;

/// Identity module - credential validation over HTTP
pub mod identity;

pub use cache::{RedisClient, RedisRevocationStore};
pub use identity::UserServiceClient;

use ag_core::errors::DomainError;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// HTTP client error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        DomainError::Store {
            message: err.to_string(),
        }
    }
}
