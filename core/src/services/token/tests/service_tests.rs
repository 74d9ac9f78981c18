//! Unit tests for the token service lifecycle

use std::sync::Arc;
use std::time::Duration;

use super::{service_with, test_config};
use crate::domain::entities::audit::AuditEventType;
use crate::domain::entities::token::TokenType;
use crate::errors::{DomainError, TokenError};
use crate::repositories::{InMemoryRevocationStore, MockRevocationStore, RevocationStore};
use crate::services::token::{LogoutOutcome, TokenServiceConfig};

fn token_err<T: std::fmt::Debug>(result: Result<T, DomainError>) -> TokenError {
    match result {
        Err(DomainError::Token(e)) => e,
        other => panic!("expected a token error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_issue_then_verify_round_trips_subject() {
    let (service, _) = service_with(Arc::new(InMemoryRevocationStore::new()), test_config());

    for subject in ["user-1", "42", "alice@example.com"] {
        let issued = service.issue_session(subject).await.unwrap();
        let identity = service
            .verify_access(&issued.tokens.access_token)
            .await
            .unwrap();

        assert_eq!(identity.subject, subject);
        assert_eq!(identity.session_id, issued.session_id);
        assert_eq!(identity.token_id, issued.access_token_id);
    }
}

#[tokio::test]
async fn test_issued_pair_shares_session_and_differs_in_token_ids() {
    let (service, _) = service_with(Arc::new(InMemoryRevocationStore::new()), test_config());
    let issued = service.issue_session("user-1").await.unwrap();

    let access = service.codec().decode(&issued.tokens.access_token).unwrap();
    let refresh = service.codec().decode(&issued.tokens.refresh_token).unwrap();

    assert_eq!(access.sid, refresh.sid);
    assert_ne!(access.jti, refresh.jti);
    assert_eq!(access.typ, TokenType::Access);
    assert_eq!(refresh.typ, TokenType::Refresh);
    assert!(access.exp < refresh.exp);
    assert_eq!(issued.tokens.access_expires_in, 60);
    assert_eq!(issued.tokens.refresh_expires_in, 3600);
}

#[tokio::test]
async fn test_issuance_never_touches_the_store() {
    let store = Arc::new(InMemoryRevocationStore::new());
    let (service, audit) = service_with(store.clone(), test_config());

    service.issue_session("user-1").await.unwrap();

    assert!(store.is_empty().await);
    assert_eq!(audit.events_of(AuditEventType::SessionIssued).len(), 1);
}

#[tokio::test]
async fn test_empty_subject_is_rejected() {
    let (service, _) = service_with(Arc::new(InMemoryRevocationStore::new()), test_config());

    assert!(matches!(
        service.issue_session("  ").await,
        Err(DomainError::Validation { .. })
    ));
}

#[tokio::test]
async fn test_expired_access_token_is_expired_and_nothing_else() {
    let config = TokenServiceConfig {
        access_token_ttl_secs: 0,
        ..test_config()
    };
    let store = Arc::new(InMemoryRevocationStore::new());
    let (service, _) = service_with(store.clone(), config);
    let issued = service.issue_session("user-1").await.unwrap();

    assert_eq!(
        token_err(service.verify_access(&issued.tokens.access_token).await),
        TokenError::Expired
    );

    // Still Expired even once its session has been revoked
    store
        .revoke_session(&issued.session_id, chrono::Utc::now() + chrono::Duration::hours(1))
        .await
        .unwrap();
    assert_eq!(
        token_err(service.verify_access(&issued.tokens.access_token).await),
        TokenError::Expired
    );
}

#[tokio::test]
async fn test_refresh_rotates_within_the_session() {
    let store = Arc::new(InMemoryRevocationStore::new());
    let (service, audit) = service_with(store.clone(), test_config());
    let issued = service.issue_session("user-1").await.unwrap();

    let rotated = service.refresh(&issued.tokens.refresh_token).await.unwrap();

    assert_eq!(rotated.subject, "user-1");
    assert_eq!(rotated.session_id, issued.session_id);
    assert_ne!(rotated.refresh_token_id, issued.refresh_token_id);
    assert_ne!(rotated.access_token_id, issued.access_token_id);
    assert!(store.is_revoked(&issued.refresh_token_id).await.unwrap());
    assert!(!store.is_revoked(&rotated.refresh_token_id).await.unwrap());

    let identity = service
        .verify_access(&rotated.tokens.access_token)
        .await
        .unwrap();
    assert_eq!(identity.subject, "user-1");
    assert_eq!(audit.events_of(AuditEventType::TokenRefreshed).len(), 1);
}

#[tokio::test]
async fn test_refresh_token_used_twice_is_reuse() {
    let (service, _) = service_with(Arc::new(InMemoryRevocationStore::new()), test_config());
    let issued = service.issue_session("user-1").await.unwrap();

    assert!(service.refresh(&issued.tokens.refresh_token).await.is_ok());
    assert_eq!(
        token_err(service.refresh(&issued.tokens.refresh_token).await),
        TokenError::TokenReuse
    );
}

#[tokio::test]
async fn test_reuse_revokes_every_token_of_the_session() {
    let store = Arc::new(InMemoryRevocationStore::new());
    let (service, audit) = service_with(store.clone(), test_config());
    let issued = service.issue_session("user-1").await.unwrap();
    let rotated = service.refresh(&issued.tokens.refresh_token).await.unwrap();

    // Replay of the rotated-out token
    assert_eq!(
        token_err(service.refresh(&issued.tokens.refresh_token).await),
        TokenError::TokenReuse
    );

    assert!(store.is_session_revoked(&issued.session_id).await.unwrap());
    assert_eq!(
        token_err(service.verify_access(&issued.tokens.access_token).await),
        TokenError::Revoked
    );
    assert_eq!(
        token_err(service.verify_access(&rotated.tokens.access_token).await),
        TokenError::Revoked
    );
    assert_eq!(
        token_err(service.refresh(&rotated.tokens.refresh_token).await),
        TokenError::Revoked
    );

    assert_eq!(audit.events_of(AuditEventType::TokenReuseDetected).len(), 1);
    let revoked = audit.events_of(AuditEventType::SessionRevoked);
    assert_eq!(revoked.len(), 1);
    assert_eq!(revoked[0].session_id.as_deref(), Some(issued.session_id.as_str()));
}

#[tokio::test]
async fn test_reuse_without_session_policy_keeps_new_pair_valid() {
    let config = TokenServiceConfig {
        revoke_session_on_reuse: false,
        ..test_config()
    };
    let store = Arc::new(InMemoryRevocationStore::new());
    let (service, audit) = service_with(store.clone(), config);
    let issued = service.issue_session("user-1").await.unwrap();
    let rotated = service.refresh(&issued.tokens.refresh_token).await.unwrap();

    assert_eq!(
        token_err(service.refresh(&issued.tokens.refresh_token).await),
        TokenError::TokenReuse
    );
    assert!(!store.is_session_revoked(&issued.session_id).await.unwrap());
    assert!(service.verify_access(&rotated.tokens.access_token).await.is_ok());
    // Reuse is still reported
    assert_eq!(audit.events_of(AuditEventType::TokenReuseDetected).len(), 1);
    assert!(audit.events_of(AuditEventType::SessionRevoked).is_empty());
}

#[tokio::test]
async fn test_wrong_token_type_in_both_directions() {
    let (service, _) = service_with(Arc::new(InMemoryRevocationStore::new()), test_config());
    let issued = service.issue_session("user-1").await.unwrap();

    assert_eq!(
        token_err(service.refresh(&issued.tokens.access_token).await),
        TokenError::WrongTokenType {
            expected: TokenType::Refresh,
            found: TokenType::Access,
        }
    );
    assert_eq!(
        token_err(service.verify_access(&issued.tokens.refresh_token).await),
        TokenError::WrongTokenType {
            expected: TokenType::Access,
            found: TokenType::Refresh,
        }
    );
}

#[tokio::test]
async fn test_missing_token_is_reported_as_missing() {
    let (service, _) = service_with(Arc::new(InMemoryRevocationStore::new()), test_config());

    assert_eq!(token_err(service.verify_access("").await), TokenError::Missing);
    assert_eq!(token_err(service.refresh(" ").await), TokenError::Missing);
}

#[tokio::test]
async fn test_logout_then_refresh_fails() {
    let store = Arc::new(InMemoryRevocationStore::new());
    let (service, audit) = service_with(store.clone(), test_config());
    let issued = service.issue_session("user-1").await.unwrap();

    let outcome = service.logout(Some(&issued.tokens.refresh_token)).await;
    assert_eq!(
        outcome,
        LogoutOutcome {
            token_revoked: true,
            session_revoked: true,
        }
    );
    assert_eq!(audit.events_of(AuditEventType::Logout).len(), 1);

    let err = token_err(service.refresh(&issued.tokens.refresh_token).await);
    assert!(matches!(err, TokenError::Revoked | TokenError::TokenReuse));

    // The access token dies with its session
    assert_eq!(
        token_err(service.verify_access(&issued.tokens.access_token).await),
        TokenError::Revoked
    );
}

#[tokio::test]
async fn test_logout_is_idempotent_and_never_fails() {
    let (service, _) = service_with(Arc::new(InMemoryRevocationStore::new()), test_config());
    let issued = service.issue_session("user-1").await.unwrap();

    service.logout(Some(&issued.tokens.refresh_token)).await;
    let second = service.logout(Some(&issued.tokens.refresh_token)).await;
    assert_eq!(second, LogoutOutcome::default());

    assert_eq!(service.logout(None).await, LogoutOutcome::default());
    assert_eq!(service.logout(Some("garbage")).await, LogoutOutcome::default());
    assert_eq!(service.logout(Some("")).await, LogoutOutcome::default());
    assert_eq!(
        service.logout(Some(&issued.tokens.access_token)).await,
        LogoutOutcome::default()
    );
}

#[tokio::test]
async fn test_logout_with_expired_refresh_token_succeeds_without_records() {
    let config = TokenServiceConfig {
        access_token_ttl_secs: 0,
        refresh_token_ttl_secs: 0,
        ..test_config()
    };
    let store = Arc::new(InMemoryRevocationStore::new());
    let (service, _) = service_with(store.clone(), config);
    let issued = service.issue_session("user-1").await.unwrap();

    assert_eq!(
        service.logout(Some(&issued.tokens.refresh_token)).await,
        LogoutOutcome::default()
    );
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_store_failure_fails_closed() {
    let store = Arc::new(MockRevocationStore::new());
    let (service, _) = service_with(store.clone(), test_config());
    let issued = service.issue_session("user-1").await.unwrap();

    store.set_should_fail(true);

    assert_eq!(
        token_err(service.verify_access(&issued.tokens.access_token).await),
        TokenError::StoreUnavailable
    );
    assert_eq!(
        token_err(service.refresh(&issued.tokens.refresh_token).await),
        TokenError::StoreUnavailable
    );
    assert_eq!(
        service.logout(Some(&issued.tokens.refresh_token)).await,
        LogoutOutcome::default()
    );

    // Nothing was burned while the store was down
    store.set_should_fail(false);
    assert!(service.refresh(&issued.tokens.refresh_token).await.is_ok());
}

#[tokio::test]
async fn test_store_timeout_fails_closed() {
    let config = TokenServiceConfig {
        store_timeout: Duration::from_millis(20),
        ..test_config()
    };
    let store = Arc::new(MockRevocationStore::new());
    let (service, _) = service_with(store.clone(), config);
    let issued = service.issue_session("user-1").await.unwrap();

    store.set_latency(Duration::from_millis(200));

    assert_eq!(
        token_err(service.verify_access(&issued.tokens.access_token).await),
        TokenError::StoreUnavailable
    );
    assert_eq!(
        token_err(service.refresh(&issued.tokens.refresh_token).await),
        TokenError::StoreUnavailable
    );
}

#[tokio::test]
async fn test_audit_failure_does_not_fail_the_request() {
    let (service, audit) = service_with(Arc::new(InMemoryRevocationStore::new()), test_config());
    audit.set_should_fail(true);

    let issued = service.issue_session("user-1").await.unwrap();
    assert!(service.refresh(&issued.tokens.refresh_token).await.is_ok());
}

#[tokio::test]
async fn test_purge_expired_through_service() {
    let store = Arc::new(InMemoryRevocationStore::new());
    let (service, _) = service_with(store.clone(), test_config());

    store
        .revoke("old", chrono::Utc::now() - chrono::Duration::seconds(1))
        .await
        .unwrap();
    assert_eq!(service.purge_expired().await.unwrap(), 1);
    assert!(store.is_empty().await);
}

/// Issue → verify → wait out the access TTL → refresh → replay
#[tokio::test]
async fn test_full_session_scenario() {
    let config = TokenServiceConfig {
        access_token_ttl_secs: 5,
        refresh_token_ttl_secs: 3600,
        ..test_config()
    };
    let store = Arc::new(InMemoryRevocationStore::new());
    let (service, _) = service_with(store.clone(), config);

    let issued = service.issue_session("user-1").await.unwrap();
    let identity = service
        .verify_access(&issued.tokens.access_token)
        .await
        .unwrap();
    assert_eq!(identity.subject, "user-1");

    tokio::time::sleep(Duration::from_secs(6)).await;
    assert_eq!(
        token_err(service.verify_access(&issued.tokens.access_token).await),
        TokenError::Expired
    );

    let rotated = service.refresh(&issued.tokens.refresh_token).await.unwrap();
    assert_ne!(rotated.tokens.refresh_token, issued.tokens.refresh_token);
    assert!(store.is_revoked(&issued.refresh_token_id).await.unwrap());

    assert_eq!(
        token_err(service.refresh(&issued.tokens.refresh_token).await),
        TokenError::TokenReuse
    );
}
