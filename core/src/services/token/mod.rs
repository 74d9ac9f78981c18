//! Token service module for JWT session management
//!
//! This module handles the whole token lifecycle:
//! - Signing key set and JWT encoding/decoding (`TokenCodec`)
//! - Session issuance, access token verification
//! - Refresh token rotation with reuse detection
//! - Logout revocation

mod codec;
mod config;
mod keys;
mod service;

#[cfg(test)]
mod tests;

pub use codec::TokenCodec;
pub use config::TokenServiceConfig;
pub use keys::{KeySet, SigningKey};
pub use service::{LogoutOutcome, TokenService};
