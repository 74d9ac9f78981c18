//! Signing key, token lifetime and cookie configuration

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{EnvReader, Environment};

/// Minimum accepted length of an HMAC signing secret, in bytes
pub const MIN_SECRET_LEN: usize = 32;

/// One entry of the signing key set
#[derive(Clone, PartialEq, Eq)]
pub struct SigningKeyConfig {
    /// Key identifier placed in the token header
    pub kid: String,
    /// Shared secret
    pub secret: String,
}

impl std::fmt::Debug for SigningKeyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKeyConfig")
            .field("kid", &self.kid)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// JWT signing configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Currently valid keys, newest first; the first one signs
    pub signing_keys: Vec<SigningKeyConfig>,

    /// JWT issuer claim
    pub issuer: String,

    /// JWT audience claim
    pub audience: String,

    /// Access token lifetime in seconds
    pub access_token_ttl_secs: i64,

    /// Refresh token lifetime in seconds
    pub refresh_token_ttl_secs: i64,

    /// Allowed clock difference between workers when checking `nbf`
    pub clock_skew_secs: i64,
}

impl JwtConfig {
    /// Identifiers of all configured keys, signing key first
    pub fn key_ids(&self) -> Vec<String> {
        self.signing_keys.iter().map(|k| k.kid.clone()).collect()
    }

    /// Parse `kid:secret,kid:secret` into a key list
    pub fn parse_signing_keys(raw: &str) -> Result<Vec<SigningKeyConfig>, String> {
        let mut keys = Vec::new();
        let mut seen = HashSet::new();

        for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (kid, secret) = entry
                .split_once(':')
                .ok_or_else(|| "each entry must be 'kid:secret'".to_string())?;
            let kid = kid.trim();
            if kid.is_empty() {
                return Err("key id must not be empty".to_string());
            }
            if secret.len() < MIN_SECRET_LEN {
                return Err(format!(
                    "secret for key '{}' must be at least {} bytes",
                    kid, MIN_SECRET_LEN
                ));
            }
            if !seen.insert(kid.to_string()) {
                return Err(format!("duplicate key id '{}'", kid));
            }
            keys.push(SigningKeyConfig {
                kid: kid.to_string(),
                secret: secret.to_string(),
            });
        }

        if keys.is_empty() {
            return Err("at least one signing key is required".to_string());
        }
        Ok(keys)
    }

    pub(crate) fn from_reader(reader: &mut EnvReader<'_>) -> Self {
        let raw_keys = reader.required("JWT_SIGNING_KEYS");
        let signing_keys = if raw_keys.is_empty() {
            Vec::new()
        } else {
            match Self::parse_signing_keys(&raw_keys) {
                Ok(keys) => keys,
                Err(reason) => {
                    reader.reject("JWT_SIGNING_KEYS", reason);
                    Vec::new()
                }
            }
        };

        let access_token_ttl_secs = reader.parse_or("ACCESS_TOKEN_TTL", 900i64);
        let refresh_token_ttl_secs = reader.parse_or("REFRESH_TOKEN_TTL", 604_800i64);
        if access_token_ttl_secs <= 0 {
            reader.reject("ACCESS_TOKEN_TTL", "must be positive");
        }
        if refresh_token_ttl_secs <= access_token_ttl_secs {
            reader.reject("REFRESH_TOKEN_TTL", "must be longer than ACCESS_TOKEN_TTL");
        }
        let clock_skew_secs = reader.parse_or("JWT_CLOCK_SKEW_SECS", 30i64);
        if clock_skew_secs < 0 {
            reader.reject("JWT_CLOCK_SKEW_SECS", "must not be negative");
        }

        Self {
            signing_keys,
            issuer: reader
                .optional("JWT_ISSUER")
                .unwrap_or_else(|| "auth-gateway".to_string()),
            audience: reader
                .optional("JWT_AUDIENCE")
                .unwrap_or_else(|| "auth-gateway-clients".to_string()),
            access_token_ttl_secs,
            refresh_token_ttl_secs,
            clock_skew_secs,
        }
    }
}

/// Cookie SameSite attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SameSitePolicy {
    Strict,
    Lax,
    None,
}

impl std::str::FromStr for SameSitePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(SameSitePolicy::Strict),
            "lax" => Ok(SameSitePolicy::Lax),
            "none" => Ok(SameSitePolicy::None),
            _ => Err(format!("Invalid SameSite policy: {}", s)),
        }
    }
}

/// Cookie transport configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CookieConfig {
    /// Access token cookie name
    pub access_name: String,

    /// Refresh token cookie name
    pub refresh_name: String,

    /// Secure flag (HTTPS only)
    pub secure: bool,

    /// SameSite attribute
    pub same_site: SameSitePolicy,

    /// Optional cookie domain
    pub domain: Option<String>,

    /// Path of the refresh token cookie
    pub refresh_path: String,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            access_name: String::from("access_token"),
            refresh_name: String::from("refresh_token"),
            secure: true,
            same_site: SameSitePolicy::Strict,
            domain: None,
            refresh_path: String::from("/"),
        }
    }
}

impl CookieConfig {
    pub(crate) fn from_reader(reader: &mut EnvReader<'_>, environment: Environment) -> Self {
        let defaults = Self::default();
        let config = Self {
            access_name: reader
                .optional("ACCESS_COOKIE_NAME")
                .unwrap_or(defaults.access_name),
            refresh_name: reader
                .optional("REFRESH_COOKIE_NAME")
                .unwrap_or(defaults.refresh_name),
            secure: reader.flag("COOKIE_SECURE", defaults.secure),
            same_site: reader.parse_or("COOKIE_SAME_SITE", defaults.same_site),
            domain: reader.optional("COOKIE_DOMAIN"),
            refresh_path: reader
                .optional("REFRESH_COOKIE_PATH")
                .unwrap_or(defaults.refresh_path),
        };

        if environment.is_production() && !config.secure {
            reader.reject("COOKIE_SECURE", "cookies must be secure in production");
        }
        if config.same_site == SameSitePolicy::None && !config.secure {
            reader.reject("COOKIE_SAME_SITE", "SameSite=None requires COOKIE_SECURE=true");
        }
        if config.access_name == config.refresh_name {
            reader.reject("REFRESH_COOKIE_NAME", "must differ from ACCESS_COOKIE_NAME");
        }
        config
    }
}

/// Session-wide revocation policy
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionPolicy {
    /// Revoke every token of a session when a rotated-out refresh token is replayed
    pub revoke_on_reuse: bool,
}

impl Default for SessionPolicy {
    fn default() -> Self {
        Self {
            revoke_on_reuse: true,
        }
    }
}

impl SessionPolicy {
    pub(crate) fn from_reader(reader: &mut EnvReader<'_>) -> Self {
        Self {
            revoke_on_reuse: reader.flag("REVOKE_SESSION_ON_REUSE", true),
        }
    }
}
