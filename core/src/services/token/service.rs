//! Main token service implementation
//!
//! Owns the session lifecycle: issuing a pair, verifying access tokens,
//! rotating refresh tokens and logging out. All mutable state lives in
//! the injected [`RevocationStore`]; the service itself is immutable after
//! construction and shared across workers behind an `Arc`.

use std::future::Future;
use std::sync::Arc;

use chrono::{Duration, Utc};

use crate::domain::entities::audit::{AuditEvent, AuditEventType};
use crate::domain::entities::token::{
    new_session_id, new_token_id, Claims, IssuedSession, TokenPair, TokenType, VerifiedIdentity,
};
use crate::errors::{DomainError, TokenError};
use crate::repositories::{AuditSink, RevocationStore};

use super::codec::TokenCodec;
use super::config::TokenServiceConfig;

/// What a logout actually managed to revoke
///
/// Logout never fails from the caller's point of view; this is for logs
/// and tests only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogoutOutcome {
    pub token_revoked: bool,
    pub session_revoked: bool,
}

/// Service for issuing, verifying, rotating and revoking session tokens
pub struct TokenService<S: RevocationStore> {
    codec: TokenCodec,
    store: Arc<S>,
    audit: Arc<dyn AuditSink>,
    config: TokenServiceConfig,
}

impl<S: RevocationStore> TokenService<S> {
    /// Creates a new token service instance
    pub fn new(
        codec: TokenCodec,
        store: Arc<S>,
        audit: Arc<dyn AuditSink>,
        config: TokenServiceConfig,
    ) -> Self {
        Self {
            codec,
            store,
            audit,
            config,
        }
    }

    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }

    /// Mints a fresh pair under a new session for an authenticated subject
    ///
    /// Issuance never touches the revocation store.
    ///
    /// # Returns
    ///
    /// * `Ok(IssuedSession)` - Both tokens plus the identifiers they carry
    /// * `Err(DomainError)` - Empty subject or signing failure
    pub async fn issue_session(&self, subject: &str) -> Result<IssuedSession, DomainError> {
        let subject = subject.trim();
        if subject.is_empty() {
            return Err(DomainError::Validation {
                message: "subject must not be empty".to_string(),
            });
        }

        let issued = self.mint_pair(subject, &new_session_id())?;
        tracing::info!(session_id = %issued.session_id, "Session issued");
        self.audit(
            AuditEvent::new(AuditEventType::SessionIssued)
                .with_subject(subject)
                .with_session(&issued.session_id)
                .with_token_id(&issued.refresh_token_id),
        )
        .await;
        Ok(issued)
    }

    /// Verifies an access token and returns who presented it
    ///
    /// # Returns
    ///
    /// * `Ok(VerifiedIdentity)` - Subject and session of a valid token
    /// * `Err(DomainError::Token)` - The specific failure kind; a store
    ///   that cannot answer in time yields `StoreUnavailable`
    pub async fn verify_access(&self, token: &str) -> Result<VerifiedIdentity, DomainError> {
        let claims = self.codec.decode_expecting(token, TokenType::Access)?;

        let (token_revoked, session_revoked) = tokio::join!(
            self.guarded("is_revoked", self.store.is_revoked(&claims.jti)),
            self.guarded("is_session_revoked", self.store.is_session_revoked(&claims.sid)),
        );
        if token_revoked? || session_revoked? {
            tracing::debug!(session_id = %claims.sid, token_id = %claims.jti, "Revoked access token presented");
            return Err(TokenError::Revoked.into());
        }

        Ok(VerifiedIdentity::from(claims))
    }

    /// Rotates a refresh token into a new pair under the same session
    ///
    /// Each refresh token is single-use. Presenting one that was already
    /// rotated out (or logged out) is reported as `TokenReuse` and, when
    /// the policy is enabled, revokes the whole session.
    ///
    /// # Returns
    ///
    /// * `Ok(IssuedSession)` - The replacement pair
    /// * `Err(DomainError::Token)` - The specific failure kind
    pub async fn refresh(&self, refresh_token: &str) -> Result<IssuedSession, DomainError> {
        let claims = self.codec.decode_expecting(refresh_token, TokenType::Refresh)?;

        let (token_revoked, session_revoked) = tokio::join!(
            self.guarded("is_revoked", self.store.is_revoked(&claims.jti)),
            self.guarded("is_session_revoked", self.store.is_session_revoked(&claims.sid)),
        );
        if token_revoked? {
            return Err(self.on_reuse(&claims).await.into());
        }
        if session_revoked? {
            tracing::debug!(session_id = %claims.sid, "Refresh attempted on a revoked session");
            return Err(TokenError::Revoked.into());
        }

        // The check above is advisory; this check-and-set decides which of
        // two concurrent refreshes with the same token wins.
        let won = self
            .guarded("revoke", self.store.revoke(&claims.jti, claims.expires_at()))
            .await?;
        if !won {
            return Err(self.on_reuse(&claims).await.into());
        }

        let issued = self.mint_pair(&claims.sub, &claims.sid)?;
        tracing::info!(
            session_id = %claims.sid,
            old_token_id = %claims.jti,
            new_token_id = %issued.refresh_token_id,
            "Refresh token rotated"
        );
        self.audit(
            AuditEvent::new(AuditEventType::TokenRefreshed)
                .with_subject(&claims.sub)
                .with_session(&claims.sid)
                .with_token_id(&claims.jti),
        )
        .await;
        Ok(issued)
    }

    /// Revokes the presented refresh token and its session
    ///
    /// Never fails: a missing, garbage, expired or already revoked token
    /// still counts as a successful logout, and store failures are only
    /// logged. The caller clears its stored credentials regardless.
    pub async fn logout(&self, refresh_token: Option<&str>) -> LogoutOutcome {
        let mut outcome = LogoutOutcome::default();

        let claims = match refresh_token.map(|t| self.codec.decode_ignoring_expiry(t)) {
            Some(Ok(claims)) => claims,
            Some(Err(e)) => {
                tracing::debug!(reason = %e, "Logout with undecodable token");
                return outcome;
            }
            None => return outcome,
        };
        if claims.typ != TokenType::Refresh {
            tracing::debug!(session_id = %claims.sid, "Logout presented a non-refresh token");
            return outcome;
        }
        if claims.is_expired() {
            // Expiry alone already invalidates it
            return outcome;
        }

        match self
            .guarded("revoke", self.store.revoke(&claims.jti, claims.expires_at()))
            .await
        {
            Ok(created) => outcome.token_revoked = created,
            Err(e) => tracing::warn!(session_id = %claims.sid, reason = %e, "Logout could not revoke token"),
        }
        match self
            .guarded(
                "revoke_session",
                self.store.revoke_session(&claims.sid, self.session_horizon()),
            )
            .await
        {
            Ok(created) => outcome.session_revoked = created,
            Err(e) => tracing::warn!(session_id = %claims.sid, reason = %e, "Logout could not revoke session"),
        }

        tracing::info!(session_id = %claims.sid, ?outcome, "Session logged out");
        self.audit(
            AuditEvent::new(AuditEventType::Logout)
                .with_subject(&claims.sub)
                .with_session(&claims.sid)
                .with_token_id(&claims.jti),
        )
        .await;
        outcome
    }

    /// Drops revocation records that no longer matter
    pub async fn purge_expired(&self) -> Result<usize, DomainError> {
        Ok(self
            .guarded("purge_expired", self.store.purge_expired())
            .await?)
    }

    /// Handles a replayed refresh token and returns the error to surface
    async fn on_reuse(&self, claims: &Claims) -> TokenError {
        tracing::warn!(
            session_id = %claims.sid,
            token_id = %claims.jti,
            "Refresh token reuse detected"
        );
        self.audit(
            AuditEvent::new(AuditEventType::TokenReuseDetected)
                .with_subject(&claims.sub)
                .with_session(&claims.sid)
                .with_token_id(&claims.jti)
                .with_reason("rotated-out refresh token presented again"),
        )
        .await;

        if self.config.revoke_session_on_reuse {
            match self
                .guarded(
                    "revoke_session",
                    self.store.revoke_session(&claims.sid, self.session_horizon()),
                )
                .await
            {
                Ok(true) => {
                    self.audit(
                        AuditEvent::new(AuditEventType::SessionRevoked)
                            .with_subject(&claims.sub)
                            .with_session(&claims.sid)
                            .with_reason("refresh token reuse"),
                    )
                    .await;
                }
                Ok(false) => {}
                Err(e) => {
                    tracing::error!(session_id = %claims.sid, reason = %e, "Failed to revoke session after reuse");
                }
            }
        }

        TokenError::TokenReuse
    }

    /// Latest instant at which any token of a live session can still expire
    fn session_horizon(&self) -> chrono::DateTime<Utc> {
        Utc::now() + Duration::seconds(self.config.refresh_token_ttl_secs)
    }

    fn mint_pair(&self, subject: &str, session_id: &str) -> Result<IssuedSession, DomainError> {
        let access_token_id = new_token_id();
        let refresh_token_id = new_token_id();
        let access_ttl = self.config.ttl_secs(TokenType::Access);
        let refresh_ttl = self.config.ttl_secs(TokenType::Refresh);

        let access_token = self.codec.encode(
            subject,
            TokenType::Access,
            session_id,
            &access_token_id,
            access_ttl,
        )?;
        let refresh_token = self.codec.encode(
            subject,
            TokenType::Refresh,
            session_id,
            &refresh_token_id,
            refresh_ttl,
        )?;

        Ok(IssuedSession {
            subject: subject.to_string(),
            session_id: session_id.to_string(),
            access_token_id,
            refresh_token_id,
            tokens: TokenPair {
                access_token,
                refresh_token,
                access_expires_in: access_ttl,
                refresh_expires_in: refresh_ttl,
            },
        })
    }

    /// Runs a store call under the configured timeout; any failure is
    /// `StoreUnavailable` so callers reject rather than allow.
    async fn guarded<T, F>(&self, operation: &'static str, call: F) -> Result<T, TokenError>
    where
        F: Future<Output = Result<T, DomainError>>,
    {
        match tokio::time::timeout(self.config.store_timeout, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                tracing::error!(operation, error = %e, "Revocation store call failed");
                Err(TokenError::StoreUnavailable)
            }
            Err(_) => {
                tracing::error!(
                    operation,
                    timeout_ms = self.config.store_timeout.as_millis() as u64,
                    "Revocation store call timed out"
                );
                Err(TokenError::StoreUnavailable)
            }
        }
    }

    async fn audit(&self, event: AuditEvent) {
        if let Err(e) = self.audit.record(&event).await {
            tracing::warn!(
                event_type = event.event_type.as_str(),
                error = %e,
                "Failed to record audit event"
            );
        }
    }
}
