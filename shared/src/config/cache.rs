//! Revocation store configuration module

use serde::{Deserialize, Serialize};

use super::EnvReader;

/// Redis-backed revocation store configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RevocationStoreConfig {
    /// Redis connection URL
    pub url: String,

    /// Per-operation timeout in milliseconds; exceeding it fails closed
    pub timeout_ms: u64,

    /// Prefix for every key written by the gateway
    pub key_prefix: String,
}

impl Default for RevocationStoreConfig {
    fn default() -> Self {
        Self {
            url: String::from("redis://localhost:6379"),
            timeout_ms: 500,
            key_prefix: String::from("authgw"),
        }
    }
}

impl RevocationStoreConfig {
    /// Operation timeout as a `Duration`
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_ms)
    }

    pub(crate) fn from_reader(reader: &mut EnvReader<'_>) -> Self {
        let defaults = Self::default();
        let url = reader.required("REVOCATION_STORE_URL");
        if !url.is_empty() && !(url.starts_with("redis://") || url.starts_with("rediss://")) {
            reader.reject("REVOCATION_STORE_URL", "expected a redis:// or rediss:// URL");
        }
        let timeout_ms = reader.parse_or("REVOCATION_STORE_TIMEOUT_MS", defaults.timeout_ms);
        if timeout_ms == 0 {
            reader.reject("REVOCATION_STORE_TIMEOUT_MS", "must be positive");
        }

        Self {
            url,
            timeout_ms,
            key_prefix: reader
                .optional("REVOCATION_KEY_PREFIX")
                .unwrap_or(defaults.key_prefix),
        }
    }
}

/// Mask credentials embedded in a connection URL
pub fn mask_url(url: &str) -> String {
    if let Some(scheme_end) = url.find("://") {
        let rest = &url[scheme_end + 3..];
        if let Some(at_pos) = rest.find('@') {
            return format!("{}://***@{}", &url[..scheme_end], &rest[at_pos + 1..]);
        }
    }
    url.to_string()
}
