//! Redis-backed revocation store shared by every gateway worker.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use ag_core::domain::entities::token::RevocationRecord;
use ag_core::errors::DomainError;
use ag_core::repositories::RevocationStore;
use ag_shared::RevocationStoreConfig;

use super::redis_client::RedisClient;
use crate::InfrastructureError;

/// Revocation records as Redis keys with a TTL
///
/// Keys are `{prefix}:revoked:token:{jti}` and
/// `{prefix}:revoked:session:{sid}`; the value is the revocation time.
/// Redis expires each key once the token it describes would have expired,
/// so nothing needs purging.
#[derive(Clone)]
pub struct RedisRevocationStore {
    client: RedisClient,
    key_prefix: String,
}

impl RedisRevocationStore {
    pub fn new(client: RedisClient, key_prefix: impl Into<String>) -> Self {
        Self {
            client,
            key_prefix: key_prefix.into(),
        }
    }

    /// Connect using the revocation store configuration
    pub async fn connect(config: &RevocationStoreConfig) -> Result<Self, InfrastructureError> {
        let client = RedisClient::new(&config.url).await?;
        Ok(Self::new(client, config.key_prefix.clone()))
    }

    pub fn token_key(&self, token_id: &str) -> String {
        revocation_key(&self.key_prefix, "token", token_id)
    }

    pub fn session_key(&self, session_id: &str) -> String {
        revocation_key(&self.key_prefix, "session", session_id)
    }

    async fn set_once(&self, key: &str, expires_at: DateTime<Utc>) -> Result<bool, DomainError> {
        let now = Utc::now();
        let record = RevocationRecord::new(expires_at);
        let created = self
            .client
            .set_nx_with_expiry(
                key,
                &record.revoked_at.to_rfc3339(),
                record.remaining_ttl_secs(now),
            )
            .await?;
        Ok(created)
    }
}

pub(crate) fn revocation_key(prefix: &str, kind: &str, id: &str) -> String {
    format!("{}:revoked:{}:{}", prefix, kind, id)
}

#[async_trait]
impl RevocationStore for RedisRevocationStore {
    async fn revoke(&self, token_id: &str, expires_at: DateTime<Utc>) -> Result<bool, DomainError> {
        let created = self.set_once(&self.token_key(token_id), expires_at).await?;
        tracing::debug!(token_id, created, "Token revocation recorded");
        Ok(created)
    }

    async fn is_revoked(&self, token_id: &str) -> Result<bool, DomainError> {
        Ok(self.client.exists(&self.token_key(token_id)).await?)
    }

    async fn revoke_session(
        &self,
        session_id: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let created = self.set_once(&self.session_key(session_id), expires_at).await?;
        tracing::debug!(session_id, created, "Session revocation recorded");
        Ok(created)
    }

    async fn is_session_revoked(&self, session_id: &str) -> Result<bool, DomainError> {
        Ok(self.client.exists(&self.session_key(session_id)).await?)
    }

    async fn purge_expired(&self) -> Result<usize, DomainError> {
        Ok(0)
    }

    async fn health_check(&self) -> Result<bool, DomainError> {
        Ok(self.client.health_check().await?)
    }
}
