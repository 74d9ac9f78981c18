//! Failure-injecting revocation store for testing.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::DomainError;

use super::{InMemoryRevocationStore, RevocationStore};

/// Wraps the in-memory store and can be told to fail or to stall
///
/// Used to exercise the fail-closed paths without a real outage.
#[derive(Debug, Default)]
pub struct MockRevocationStore {
    inner: InMemoryRevocationStore,
    should_fail: AtomicBool,
    latency_ms: AtomicU64,
}

impl MockRevocationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call answer with a store error
    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    /// Delay every call by `latency`
    pub fn set_latency(&self, latency: Duration) {
        self.latency_ms
            .store(latency.as_millis() as u64, Ordering::SeqCst);
    }

    async fn before_call(&self) -> Result<(), DomainError> {
        let latency = self.latency_ms.load(Ordering::SeqCst);
        if latency > 0 {
            tokio::time::sleep(Duration::from_millis(latency)).await;
        }
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::Store {
                message: "Mock store error".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl RevocationStore for MockRevocationStore {
    async fn revoke(&self, token_id: &str, expires_at: DateTime<Utc>) -> Result<bool, DomainError> {
        self.before_call().await?;
        self.inner.revoke(token_id, expires_at).await
    }

    async fn is_revoked(&self, token_id: &str) -> Result<bool, DomainError> {
        self.before_call().await?;
        self.inner.is_revoked(token_id).await
    }

    async fn revoke_session(
        &self,
        session_id: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        self.before_call().await?;
        self.inner.revoke_session(session_id, expires_at).await
    }

    async fn is_session_revoked(&self, session_id: &str) -> Result<bool, DomainError> {
        self.before_call().await?;
        self.inner.is_session_revoked(session_id).await
    }

    async fn purge_expired(&self) -> Result<usize, DomainError> {
        self.before_call().await?;
        self.inner.purge_expired().await
    }

    async fn health_check(&self) -> Result<bool, DomainError> {
        self.before_call().await?;
        self.inner.health_check().await
    }
}
