//! Revocation store trait defining the interface for revocation records.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::DomainError;

/// Shared record of tokens and sessions invalidated before their expiry
///
/// Every worker consults the same store, so implementations must be safe
/// to call concurrently and must make `revoke` an atomic check-and-set:
/// once a `revoke` call has returned, no later `is_revoked` call for the
/// same id may answer `false`.
///
/// Records only need to outlive the token they describe; `expires_at` is
/// the token's own expiry and implementations are free to forget the
/// record after it.
#[async_trait]
pub trait RevocationStore: Send + Sync {
    /// Revoke a single token instance
    ///
    /// # Returns
    /// * `Ok(true)` - This call created the record
    /// * `Ok(false)` - The token was already revoked (not an error)
    /// * `Err(DomainError)` - The store could not be reached
    async fn revoke(&self, token_id: &str, expires_at: DateTime<Utc>) -> Result<bool, DomainError>;

    /// Check whether a token instance has been revoked
    async fn is_revoked(&self, token_id: &str) -> Result<bool, DomainError>;

    /// Revoke every token issued under a session
    ///
    /// `expires_at` should be the latest expiry of any token the session
    /// may still hold. Same return contract as [`RevocationStore::revoke`].
    async fn revoke_session(
        &self,
        session_id: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, DomainError>;

    /// Check whether a whole session has been revoked
    async fn is_session_revoked(&self, session_id: &str) -> Result<bool, DomainError>;

    /// Drop records whose tokens have expired; returns how many were removed
    ///
    /// Stores with native TTLs return `Ok(0)`.
    async fn purge_expired(&self) -> Result<usize, DomainError>;

    /// Check that the store is reachable
    async fn health_check(&self) -> Result<bool, DomainError>;
}
