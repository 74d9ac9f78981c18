//! Server configuration module

use serde::{Deserialize, Serialize};

use super::EnvReader;

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server host address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Worker threads
    pub workers: usize,

    /// Keep-alive timeout in seconds
    pub keep_alive_secs: u64,

    /// Graceful shutdown timeout in seconds
    pub shutdown_timeout_secs: u64,

    /// Comma separated origins allowed to send credentials in production
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("0.0.0.0"),
            port: 5000,
            workers: default_workers(),
            keep_alive_secs: 30,
            shutdown_timeout_secs: 30,
            allowed_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Create a new server configuration
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Get the bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub(crate) fn from_reader(reader: &mut EnvReader<'_>) -> Self {
        let defaults = Self::default();
        let workers = reader.parse_or("SERVER_WORKERS", defaults.workers);
        if workers == 0 {
            reader.reject("SERVER_WORKERS", "must be at least 1");
        }

        Self {
            host: reader.optional("SERVER_HOST").unwrap_or(defaults.host),
            port: reader.parse_or("SERVER_PORT", defaults.port),
            workers,
            keep_alive_secs: reader.parse_or("SERVER_KEEP_ALIVE_SECS", defaults.keep_alive_secs),
            shutdown_timeout_secs: reader
                .parse_or("SERVER_SHUTDOWN_TIMEOUT_SECS", defaults.shutdown_timeout_secs),
            allowed_origins: reader
                .optional("ALLOWED_ORIGINS")
                .map(|raw| {
                    raw.split(',')
                        .map(|o| o.trim().to_string())
                        .filter(|o| !o.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
        }
    }
}

/// `2 * cores + 1`
fn default_workers() -> usize {
    num_cpus::get() * 2 + 1
}
