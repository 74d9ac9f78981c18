//! Shared fixtures for the HTTP integration tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::test::TestRequest;
use actix_web::web;
use async_trait::async_trait;

use ag_api::AppState;
use ag_core::errors::{AuthError, DomainError};
use ag_core::repositories::{InMemoryAuditSink, MockRevocationStore};
use ag_core::services::{
    CredentialValidator, Credentials, KeySet, TokenCodec, TokenService, TokenServiceConfig,
};
use ag_shared::AppConfig;

pub const SIGNING_KEYS: &str = "k1:integration-test-secret-0123456789abcdef";
pub const ACCESS_COOKIE: &str = "access_token";
pub const REFRESH_COOKIE: &str = "refresh_token";

/// Accepts alice, reports the user service down for `offline`
pub struct StubValidator;

#[async_trait]
impl CredentialValidator for StubValidator {
    async fn validate(&self, credentials: &Credentials) -> Result<String, DomainError> {
        match (credentials.username.as_str(), credentials.password.as_str()) {
            ("alice", "wonderland") => Ok("user-alice".to_string()),
            ("offline", _) => Err(AuthError::IdentityServiceUnavailable.into()),
            _ => Err(AuthError::InvalidCredentials.into()),
        }
    }
}

pub type TestState = AppState<MockRevocationStore, StubValidator>;

pub struct TestContext {
    pub state: web::Data<TestState>,
    pub store: Arc<MockRevocationStore>,
    pub audit: InMemoryAuditSink,
}

/// Configuration as loaded from a `testing` environment plus `overrides`
pub fn config_with(overrides: &[(&str, &str)]) -> AppConfig {
    let mut vars: HashMap<String, String> = [
        ("ENVIRONMENT", "testing"),
        ("JWT_SIGNING_KEYS", SIGNING_KEYS),
        ("ACCESS_TOKEN_TTL", "60"),
        ("REFRESH_TOKEN_TTL", "3600"),
        ("REVOCATION_STORE_URL", "redis://:store-password@localhost:6379"),
        ("REVOCATION_STORE_TIMEOUT_MS", "200"),
        ("USER_SERVICE_URL", "http://localhost:9000"),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    for (key, value) in overrides {
        vars.insert(key.to_string(), value.to_string());
    }

    AppConfig::from_lookup(&|key: &str| vars.get(key).cloned()).unwrap()
}

pub fn context() -> TestContext {
    context_with(config_with(&[]))
}

pub fn context_with(config: AppConfig) -> TestContext {
    let store = Arc::new(MockRevocationStore::new());
    let audit = InMemoryAuditSink::new();
    let codec = TokenCodec::new(
        KeySet::from_config(&config.jwt.signing_keys).unwrap(),
        config.jwt.issuer.clone(),
        config.jwt.audience.clone(),
    )
    .with_clock_skew(config.jwt.clock_skew_secs);
    let token_service = TokenService::new(
        codec,
        Arc::clone(&store),
        Arc::new(audit.clone()),
        TokenServiceConfig::from_app_config(&config),
    );
    let state = web::Data::new(AppState::new(
        Arc::new(token_service),
        Arc::new(StubValidator),
        Arc::new(config),
    ));

    TestContext {
        state,
        store,
        audit,
    }
}

/// Value of a `Set-Cookie` on the response, if any
pub fn response_cookie<B>(resp: &ServiceResponse<B>, name: &str) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|cookie| cookie.name() == name)
        .map(|cookie| cookie.into_owned())
}

pub fn login_request() -> TestRequest {
    TestRequest::post()
        .uri("/login")
        .set_json(serde_json::json!({"username": "alice", "password": "wonderland"}))
}
