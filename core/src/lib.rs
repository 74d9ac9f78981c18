//! # AuthGateway Core
//!
//! Token lifecycle core for the authentication gateway: session issuance,
//! access token verification, refresh token rotation with reuse detection
//! and logout revocation, plus the revocation store and audit interfaces
//! they depend on.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
