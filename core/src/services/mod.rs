//! Business services containing the token lifecycle and its boundaries.

pub mod credentials;
pub mod token;

pub use credentials::{CredentialValidator, Credentials};
pub use token::{KeySet, LogoutOutcome, SigningKey, TokenCodec, TokenService, TokenServiceConfig};
