//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - Signing keys, token lifetimes, cookies and session policy
//! - `cache` - Revocation store connection
//! - `environment` - Environment detection, logging and debug gating
//! - `server` - HTTP server and worker tuning
//! - `upstream` - External user-identity service
//!
//! Everything is read exactly once at startup through [`AppConfig::from_env`].
//! Missing required keys and malformed values are collected into a single
//! [`ConfigError`] rather than failing on the first problem.

pub mod auth;
pub mod cache;
pub mod environment;
pub mod server;
pub mod upstream;

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

pub use auth::{CookieConfig, JwtConfig, SameSitePolicy, SessionPolicy, SigningKeyConfig};
pub use cache::{mask_url, RevocationStoreConfig};
pub use environment::{DebugConfig, Environment, LogFormat, LoggingConfig};
pub use server::ServerConfig;
pub use upstream::UpstreamConfig;

/// Startup configuration failure enumerating every offending key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// Required keys that were absent or empty
    pub missing: Vec<String>,
    /// Keys whose values could not be accepted, with the reason
    pub invalid: Vec<(String, String)>,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid configuration")?;
        if !self.missing.is_empty() {
            write!(f, "; missing required keys: {}", self.missing.join(", "))?;
        }
        if !self.invalid.is_empty() {
            let invalid: Vec<String> = self
                .invalid
                .iter()
                .map(|(key, reason)| format!("{} ({})", key, reason))
                .collect();
            write!(f, "; invalid values: {}", invalid.join(", "))?;
        }
        Ok(())
    }
}

impl std::error::Error for ConfigError {}

/// Accumulating reader over a key/value source
///
/// Every accessor records problems instead of returning early so that one
/// startup attempt reports all of them.
pub struct EnvReader<'a> {
    lookup: &'a dyn Fn(&str) -> Option<String>,
    missing: Vec<String>,
    invalid: Vec<(String, String)>,
}

impl<'a> EnvReader<'a> {
    /// Create a reader over an arbitrary lookup function
    pub fn new(lookup: &'a dyn Fn(&str) -> Option<String>) -> Self {
        Self {
            lookup,
            missing: Vec::new(),
            invalid: Vec::new(),
        }
    }

    /// Read an optional value; blank values count as absent
    pub fn optional(&self, key: &str) -> Option<String> {
        (self.lookup)(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// Read the first present key out of a list of aliases
    pub fn optional_any(&self, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|key| self.optional(key))
    }

    /// Read a required value, recording it as missing when absent
    pub fn required(&mut self, key: &str) -> String {
        match self.optional(key) {
            Some(value) => value,
            None => {
                self.missing.push(key.to_string());
                String::new()
            }
        }
    }

    /// Parse a value, falling back to `default` when absent
    pub fn parse_or<T>(&mut self, key: &str, default: T) -> T
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        match self.optional(key) {
            Some(raw) => match raw.parse() {
                Ok(value) => value,
                Err(e) => {
                    self.reject(key, e.to_string());
                    default
                }
            },
            None => default,
        }
    }

    /// Parse a boolean flag (`true/false/1/0/yes/no/on/off`)
    pub fn flag(&mut self, key: &str, default: bool) -> bool {
        match self.optional(key) {
            Some(raw) => match raw.to_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => true,
                "false" | "0" | "no" | "off" => false,
                _ => {
                    self.reject(key, format!("expected a boolean, got '{}'", raw));
                    default
                }
            },
            None => default,
        }
    }

    /// Record an invalid value
    pub fn reject(&mut self, key: &str, reason: impl Into<String>) {
        self.invalid.push((key.to_string(), reason.into()));
    }

    fn finish(self) -> Result<(), ConfigError> {
        if self.missing.is_empty() && self.invalid.is_empty() {
            Ok(())
        } else {
            Err(ConfigError {
                missing: self.missing,
                invalid: self.invalid,
            })
        }
    }
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Environment class
    pub environment: Environment,

    /// HTTP server configuration
    pub server: ServerConfig,

    /// Signing keys and token lifetimes
    pub jwt: JwtConfig,

    /// Cookie transport settings
    pub cookies: CookieConfig,

    /// Session revocation policy
    pub session: SessionPolicy,

    /// Revocation store connection
    pub revocation_store: RevocationStoreConfig,

    /// External user-identity service
    pub upstream: UpstreamConfig,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// Development-only endpoints
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from the process environment (and `.env` if present)
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(&|key: &str| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key/value source
    pub fn from_lookup(lookup: &dyn Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut reader = EnvReader::new(lookup);

        let environment = Environment::from_reader(&mut reader);
        let server = ServerConfig::from_reader(&mut reader);
        let jwt = JwtConfig::from_reader(&mut reader);
        let cookies = CookieConfig::from_reader(&mut reader, environment);
        let session = SessionPolicy::from_reader(&mut reader);
        let revocation_store = RevocationStoreConfig::from_reader(&mut reader);
        let upstream = UpstreamConfig::from_reader(&mut reader);
        let logging = LoggingConfig::from_reader(&mut reader);
        let debug = DebugConfig::from_reader(&mut reader);

        reader.finish()?;

        Ok(Self {
            environment,
            server,
            jwt,
            cookies,
            session,
            revocation_store,
            upstream,
            logging,
            debug,
        })
    }

    /// Whether the development-only token introspection endpoint is reachable
    pub fn debug_endpoints_enabled(&self) -> bool {
        self.debug.enable_endpoints && self.environment.allows_debug_endpoints()
    }

    /// Non-secret view of the runtime configuration
    pub fn public_view(&self) -> PublicConfig {
        PublicConfig {
            environment: self.environment.to_string(),
            log_level: self.logging.level.clone(),
            user_service_url: mask_url(&self.upstream.user_service_url),
            revocation_store_url: mask_url(&self.revocation_store.url),
            jwt_issuer: self.jwt.issuer.clone(),
            jwt_audience: self.jwt.audience.clone(),
            signing_key_ids: self.jwt.key_ids(),
            access_token_ttl: self.jwt.access_token_ttl_secs,
            refresh_token_ttl: self.jwt.refresh_token_ttl_secs,
            revoke_session_on_reuse: self.session.revoke_on_reuse,
            debug_endpoints: self.debug_endpoints_enabled(),
        }
    }
}

/// Serializable configuration with secrets removed
#[derive(Debug, Clone, Serialize)]
pub struct PublicConfig {
    pub environment: String,
    pub log_level: String,
    pub user_service_url: String,
    pub revocation_store_url: String,
    pub jwt_issuer: String,
    pub jwt_audience: String,
    pub signing_key_ids: Vec<String>,
    pub access_token_ttl: i64,
    pub refresh_token_ttl: i64,
    pub revoke_session_on_reuse: bool,
    pub debug_endpoints: bool,
}
