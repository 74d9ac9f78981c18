//! HTTP client for the user service that validates credentials.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use ag_core::errors::{AuthError, DomainError};
use ag_core::services::credentials::{CredentialValidator, Credentials};
use ag_shared::UpstreamConfig;

use crate::InfrastructureError;

#[derive(Serialize)]
struct ValidateRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct ValidateResponse {
    subject: String,
}

/// Validates credentials with `POST {base}/auth/validate`
///
/// `2xx` with `{"subject": ...}` authenticates, `401`/`403`/`404` reject,
/// anything else (including timeouts) means the service is unavailable.
#[derive(Debug, Clone)]
pub struct UserServiceClient {
    http: reqwest::Client,
    validate_url: String,
}

impl UserServiceClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self, InfrastructureError> {
        let http = reqwest::Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            http,
            validate_url: format!(
                "{}/auth/validate",
                config.user_service_url.trim_end_matches('/')
            ),
        })
    }
}

#[async_trait]
impl CredentialValidator for UserServiceClient {
    async fn validate(&self, credentials: &Credentials) -> Result<String, DomainError> {
        let response = self
            .http
            .post(&self.validate_url)
            .json(&ValidateRequest {
                username: &credentials.username,
                password: &credentials.password,
            })
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, timeout = e.is_timeout(), "User service request failed");
                AuthError::IdentityServiceUnavailable
            })?;

        match response.status() {
            status if status.is_success() => {
                let body: ValidateResponse = response.json().await.map_err(|e| {
                    warn!(error = %e, "User service returned an unreadable body");
                    AuthError::IdentityServiceUnavailable
                })?;
                let subject = body.subject.trim().to_string();
                if subject.is_empty() {
                    warn!("User service returned an empty subject");
                    return Err(AuthError::IdentityServiceUnavailable.into());
                }
                debug!("Credentials accepted by user service");
                Ok(subject)
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND => {
                debug!(status = %response.status(), "Credentials rejected by user service");
                Err(AuthError::InvalidCredentials.into())
            }
            status => {
                warn!(%status, "User service answered with an unexpected status");
                Err(AuthError::IdentityServiceUnavailable.into())
            }
        }
    }
}
