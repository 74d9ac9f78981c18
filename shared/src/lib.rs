//! Shared configuration and common types for the authentication gateway
//!
//! This crate provides functionality used across all server modules:
//! - Configuration types loaded once from the process environment
//! - Error codes and the standard error response body
//! - Health and introspection response types

pub mod config;
pub mod errors;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, ConfigError, CookieConfig, DebugConfig, Environment, JwtConfig, LoggingConfig,
    RevocationStoreConfig, ServerConfig, SessionPolicy, SigningKeyConfig, UpstreamConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use types::{HealthResponse, HealthStatus, ServiceHealth};
