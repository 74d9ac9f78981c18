//! Configuration for the token service

use std::time::Duration;

use ag_shared::AppConfig;

use crate::domain::entities::token::TokenType;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// JWT issuer claim
    pub issuer: String,
    /// JWT audience claim
    pub audience: String,
    /// Access token lifetime in seconds
    pub access_token_ttl_secs: i64,
    /// Refresh token lifetime in seconds
    pub refresh_token_ttl_secs: i64,
    /// Upper bound on any single revocation store call
    pub store_timeout: Duration,
    /// Revoke the whole session when a rotated-out refresh token is replayed
    pub revoke_session_on_reuse: bool,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            issuer: "auth-gateway".to_string(),
            audience: "auth-gateway-clients".to_string(),
            access_token_ttl_secs: 900,
            refresh_token_ttl_secs: 604_800,
            store_timeout: Duration::from_millis(500),
            revoke_session_on_reuse: true,
        }
    }
}

impl TokenServiceConfig {
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            issuer: config.jwt.issuer.clone(),
            audience: config.jwt.audience.clone(),
            access_token_ttl_secs: config.jwt.access_token_ttl_secs,
            refresh_token_ttl_secs: config.jwt.refresh_token_ttl_secs,
            store_timeout: config.revocation_store.timeout(),
            revoke_session_on_reuse: config.session.revoke_on_reuse,
        }
    }

    /// Lifetime of a token of the given type, in seconds
    pub fn ttl_secs(&self, token_type: TokenType) -> i64 {
        match token_type {
            TokenType::Access => self.access_token_ttl_secs,
            TokenType::Refresh => self.refresh_token_ttl_secs,
        }
    }
}
