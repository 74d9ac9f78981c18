//! Credential validation boundary.
//!
//! Usernames and passwords are checked by an external identity service;
//! the gateway only ever sees the subject it answers with.

use async_trait::async_trait;
use serde::Deserialize;

use crate::errors::DomainError;

/// Raw user credentials as submitted at login
#[derive(Clone, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Checks credentials against the identity service
#[async_trait]
pub trait CredentialValidator: Send + Sync {
    /// Validate credentials and return the authenticated subject
    ///
    /// # Returns
    /// * `Ok(String)` - The subject identifier
    /// * `Err(DomainError::Auth(AuthError::InvalidCredentials))` - Rejected
    /// * `Err(DomainError::Auth(AuthError::IdentityServiceUnavailable))` -
    ///   The service could not be reached or answered unexpectedly
    async fn validate(&self, credentials: &Credentials) -> Result<String, DomainError>;

    /// Check that the identity service is reachable
    async fn health_check(&self) -> Result<bool, DomainError> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_is_redacted_in_debug() {
        let creds = Credentials::new("alice", "hunter2");
        let rendered = format!("{:?}", creds);

        assert!(rendered.contains("alice"));
        assert!(!rendered.contains("hunter2"));
    }
}
