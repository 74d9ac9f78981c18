//! Tests for the token codec and the token service

mod concurrency_tests;
mod service_tests;

use std::sync::Arc;
use std::time::Duration;

use crate::repositories::{InMemoryAuditSink, RevocationStore};
use crate::services::token::{KeySet, SigningKey, TokenCodec, TokenService, TokenServiceConfig};

pub(super) const SECRET_A: &[u8] = b"test-secret-a-0123456789abcdef-xyz";
pub(super) const SECRET_B: &[u8] = b"test-secret-b-0123456789abcdef-xyz";

pub(super) fn key_set(keys: &[(&str, &[u8])]) -> KeySet {
    KeySet::new(
        keys.iter()
            .map(|(kid, secret)| SigningKey::from_secret(*kid, secret))
            .collect(),
    )
    .unwrap()
}

pub(super) fn codec() -> TokenCodec {
    TokenCodec::new(
        key_set(&[("k1", SECRET_A)]),
        "auth-gateway",
        "auth-gateway-clients",
    )
}

pub(super) fn test_config() -> TokenServiceConfig {
    TokenServiceConfig {
        access_token_ttl_secs: 60,
        refresh_token_ttl_secs: 3600,
        store_timeout: Duration::from_millis(200),
        ..TokenServiceConfig::default()
    }
}

/// A service over `store` with a fresh in-memory audit sink
pub(super) fn service_with<S: RevocationStore>(
    store: Arc<S>,
    config: TokenServiceConfig,
) -> (TokenService<S>, InMemoryAuditSink) {
    let audit = InMemoryAuditSink::new();
    let service = TokenService::new(codec(), store, Arc::new(audit.clone()), config);
    (service, audit)
}
