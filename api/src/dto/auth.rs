use serde::{Deserialize, Serialize};
use validator::Validate;

use ag_core::domain::{Claims, IssuedSession};

#[derive(Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 256))]
    pub username: String,
    #[validate(length(min = 1, max = 1024))]
    pub password: String,
}

impl LoginRequest {
    /// Trims the username; surrounding whitespace is never part of it
    pub fn normalized(mut self) -> Self {
        self.username = self.username.trim().to_string();
        self
    }
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Body accepted by refresh and logout when the cookie is not used
#[derive(Clone, Default, Deserialize)]
pub struct RefreshTokenRequest {
    #[serde(default)]
    pub refresh_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub session_id: String,
    pub access_expires_in: i64,
    pub refresh_expires_in: i64,
}

impl From<&IssuedSession> for TokenResponse {
    fn from(issued: &IssuedSession) -> Self {
        Self {
            access_token: issued.tokens.access_token.clone(),
            refresh_token: issued.tokens.refresh_token.clone(),
            token_type: "Bearer".to_string(),
            session_id: issued.session_id.clone(),
            access_expires_in: issued.tokens.access_expires_in,
            refresh_expires_in: issued.tokens.refresh_expires_in,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub subject: String,
    pub session_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionResponse {
    pub version: String,
}

/// One cookie as seen by the debug endpoint
#[derive(Debug, Clone, Serialize)]
pub struct TokenInspection {
    pub raw: String,
    pub claims: Option<Claims>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DebugTokensResponse {
    pub access_token: Option<TokenInspection>,
    pub refresh_token: Option<TokenInspection>,
}
