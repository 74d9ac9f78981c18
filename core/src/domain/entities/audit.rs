//! Audit event entity for recording token lifecycle and security events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Event types recorded on the audit trail
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditEventType {
    // Issuance and rotation
    SessionIssued,
    TokenRefreshed,

    // Security events
    TokenReuseDetected,
    SessionRevoked,

    // Session end
    Logout,
}

impl AuditEventType {
    /// Convert to string representation for log sinks
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SessionIssued => "SESSION_ISSUED",
            Self::TokenRefreshed => "TOKEN_REFRESHED",
            Self::TokenReuseDetected => "TOKEN_REUSE_DETECTED",
            Self::SessionRevoked => "SESSION_REVOKED",
            Self::Logout => "LOGOUT",
        }
    }

    /// Security events are reported at warning level
    pub fn is_security_event(&self) -> bool {
        matches!(self, Self::TokenReuseDetected | Self::SessionRevoked)
    }
}

/// A single audit record; carries identifiers only, never raw tokens
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuditEvent {
    /// Unique identifier for the record
    pub id: Uuid,

    /// Type of event
    pub event_type: AuditEventType,

    /// Principal the event concerns, when known
    pub subject: Option<String>,

    /// Session the event concerns, when known
    pub session_id: Option<String>,

    /// Token instance the event concerns, when known
    pub token_id: Option<String>,

    /// Failure or revocation reason
    pub reason: Option<String>,

    /// Timestamp when the event occurred
    pub occurred_at: DateTime<Utc>,
}

impl AuditEvent {
    pub fn new(event_type: AuditEventType) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_type,
            subject: None,
            session_id: None,
            token_id: None,
            reason: None,
            occurred_at: Utc::now(),
        }
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn with_token_id(mut self, token_id: impl Into<String>) -> Self {
        self.token_id = Some(token_id.into());
        self
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}
