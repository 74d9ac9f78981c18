//! Environment configuration module

use serde::{Deserialize, Serialize};

use super::EnvReader;

/// Application environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment
    #[default]
    Development,
    /// Automated test environment
    Testing,
    /// Staging environment
    Staging,
    /// Production environment
    Production,
}

impl Environment {
    /// Check if running in production
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    /// Check if running in development
    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }

    /// Raw-token introspection is only ever allowed in development and testing
    pub fn allows_debug_endpoints(&self) -> bool {
        matches!(self, Environment::Development | Environment::Testing)
    }

    pub(crate) fn from_reader(reader: &mut EnvReader<'_>) -> Self {
        match reader.optional_any(&["ENVIRONMENT", "APP_ENV"]) {
            Some(raw) => match raw.parse() {
                Ok(env) => env,
                Err(e) => {
                    reader.reject("ENVIRONMENT", e);
                    Environment::default()
                }
            },
            None => Environment::default(),
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Testing => write!(f, "testing"),
            Environment::Staging => write!(f, "staging"),
            Environment::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "testing" | "test" => Ok(Environment::Testing),
            "staging" | "stage" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(format!("Invalid environment: {}", s)),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable, multi-line
    Pretty,
    /// One JSON object per line
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Invalid log format: {}", s)),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level or filter directive (trace, debug, info, warn, error)
    pub level: String,

    /// Output format
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: LogFormat::Pretty,
        }
    }
}

impl LoggingConfig {
    pub(crate) fn from_reader(reader: &mut EnvReader<'_>) -> Self {
        let defaults = Self::default();
        Self {
            level: reader.optional("LOG_LEVEL").unwrap_or(defaults.level).to_lowercase(),
            format: reader.parse_or("LOG_FORMAT", defaults.format),
        }
    }
}

/// Development-only endpoint gating
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DebugConfig {
    /// Register the token introspection endpoint
    pub enable_endpoints: bool,
}

impl DebugConfig {
    pub(crate) fn from_reader(reader: &mut EnvReader<'_>) -> Self {
        Self {
            enable_endpoints: reader.flag("ENABLE_DEBUG_ENDPOINTS", false),
        }
    }
}
