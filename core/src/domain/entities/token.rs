//! Token entities for JWT-based session credentials.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// The two kinds of token minted for every session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// Short-lived credential presented on every protected request
    Access,
    /// Single-use credential exchanged for a new pair
    Refresh,
}

impl TokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Access => "access",
            Self::Refresh => "refresh",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (principal identifier from the identity service)
    pub sub: String,

    /// Session identifier shared by a pair minted together
    pub sid: String,

    /// JWT ID, unique per token instance; revocation is keyed on it
    pub jti: String,

    /// Token type
    pub typ: TokenType,

    /// Issued at timestamp
    pub iat: i64,

    /// Not before timestamp
    pub nbf: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,
}

impl Claims {
    /// Checks if the claims have expired at `now`
    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.exp
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now().timestamp())
    }

    /// Expiry as a `DateTime`
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

/// Fresh identifiers for a new session
pub fn new_session_id() -> String {
    Uuid::new_v4().to_string()
}

/// Fresh identifier for a single token
pub fn new_token_id() -> String {
    Uuid::new_v4().to_string()
}

/// Marks a token or session as invalid before its natural expiry
///
/// A record only matters until `expires_at`; past that point the token
/// is rejected on expiry alone and the record may be dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevocationRecord {
    pub revoked_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl RevocationRecord {
    pub fn new(expires_at: DateTime<Utc>) -> Self {
        Self {
            revoked_at: Utc::now(),
            expires_at,
        }
    }

    /// Whether the record still needs to be honoured at `now`
    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }

    /// Seconds left until the record can be forgotten, at least one
    pub fn remaining_ttl_secs(&self, now: DateTime<Utc>) -> u64 {
        (self.expires_at - now).num_seconds().max(1) as u64
    }
}

/// Token pair returned to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// JWT access token
    pub access_token: String,

    /// JWT refresh token
    pub refresh_token: String,

    /// Access token lifetime in seconds
    pub access_expires_in: i64,

    /// Refresh token lifetime in seconds
    pub refresh_expires_in: i64,
}

/// A freshly minted pair together with the identifiers it was minted under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedSession {
    pub subject: String,
    pub session_id: String,
    pub access_token_id: String,
    pub refresh_token_id: String,
    pub tokens: TokenPair,
}

/// The outcome of a successful access-token verification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedIdentity {
    pub subject: String,
    pub session_id: String,
    pub token_id: String,
    pub expires_at: DateTime<Utc>,
}

impl From<Claims> for VerifiedIdentity {
    fn from(claims: Claims) -> Self {
        let expires_at = claims.expires_at();
        Self {
            subject: claims.sub,
            session_id: claims.sid,
            token_id: claims.jti,
            expires_at,
        }
    }
}
