//! In-memory revocation store.
//!
//! Backs tests and single-process development setups. Not shared across
//! worker processes, so production deployments use the Redis store.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::entities::token::RevocationRecord;
use crate::errors::DomainError;

use super::RevocationStore;

/// Revocation records held in process memory
///
/// Each map sits behind its own `RwLock`; `revoke` performs its check and
/// its insert under a single write guard, which makes it the atomic
/// check-and-set the trait requires. Expired records count as absent and
/// are replaced on the next revoke of the same id or dropped by
/// [`RevocationStore::purge_expired`].
#[derive(Debug, Default)]
pub struct InMemoryRevocationStore {
    tokens: RwLock<HashMap<String, RevocationRecord>>,
    sessions: RwLock<HashMap<String, RevocationRecord>>,
}

impl InMemoryRevocationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently held, live or not
    #[cfg(test)]
    pub(crate) async fn len(&self) -> usize {
        self.tokens.read().await.len() + self.sessions.read().await.len()
    }

    #[cfg(test)]
    pub(crate) async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    async fn insert_if_absent(
        map: &RwLock<HashMap<String, RevocationRecord>>,
        id: &str,
        expires_at: DateTime<Utc>,
    ) -> bool {
        let now = Utc::now();
        let mut guard = map.write().await;
        match guard.get(id) {
            Some(existing) if existing.is_live_at(now) => false,
            _ => {
                guard.insert(id.to_string(), RevocationRecord::new(expires_at));
                true
            }
        }
    }

    async fn contains_live(map: &RwLock<HashMap<String, RevocationRecord>>, id: &str) -> bool {
        let now = Utc::now();
        map.read()
            .await
            .get(id)
            .map(|record| record.is_live_at(now))
            .unwrap_or(false)
    }
}

#[async_trait]
impl RevocationStore for InMemoryRevocationStore {
    async fn revoke(&self, token_id: &str, expires_at: DateTime<Utc>) -> Result<bool, DomainError> {
        let created = Self::insert_if_absent(&self.tokens, token_id, expires_at).await;
        tracing::debug!(token_id, created, "Token revocation recorded");
        Ok(created)
    }

    async fn is_revoked(&self, token_id: &str) -> Result<bool, DomainError> {
        Ok(Self::contains_live(&self.tokens, token_id).await)
    }

    async fn revoke_session(
        &self,
        session_id: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let created = Self::insert_if_absent(&self.sessions, session_id, expires_at).await;
        tracing::debug!(session_id, created, "Session revocation recorded");
        Ok(created)
    }

    async fn is_session_revoked(&self, session_id: &str) -> Result<bool, DomainError> {
        Ok(Self::contains_live(&self.sessions, session_id).await)
    }

    async fn purge_expired(&self) -> Result<usize, DomainError> {
        let now = Utc::now();
        let mut removed = 0;
        for map in [&self.tokens, &self.sessions] {
            let mut guard = map.write().await;
            let before = guard.len();
            guard.retain(|_, record| record.is_live_at(now));
            removed += before - guard.len();
        }
        if removed > 0 {
            tracing::debug!(removed, "Purged expired revocation records");
        }
        Ok(removed)
    }

    async fn health_check(&self) -> Result<bool, DomainError> {
        Ok(true)
    }
}
