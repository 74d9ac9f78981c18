//! User-identity service configuration

use serde::{Deserialize, Serialize};

use super::EnvReader;

/// External credential validator
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// Base URL of the user service
    pub user_service_url: String,

    /// Request timeout in milliseconds
    pub timeout_ms: u64,
}

impl UpstreamConfig {
    /// Request timeout as a `Duration`
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_ms)
    }

    pub(crate) fn from_reader(reader: &mut EnvReader<'_>) -> Self {
        let user_service_url = reader.required("USER_SERVICE_URL");
        if !user_service_url.is_empty()
            && !(user_service_url.starts_with("http://") || user_service_url.starts_with("https://"))
        {
            reader.reject("USER_SERVICE_URL", "expected an http:// or https:// URL");
        }

        Self {
            user_service_url: user_service_url.trim_end_matches('/').to_string(),
            timeout_ms: reader.parse_or("USER_SERVICE_TIMEOUT_MS", 3000u64),
        }
    }
}
