//! Server configuration module

use serde::{Deserialize, Serialize};

use super::{parse_or, string_or};

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server host address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Worker threads (0 = number of CPU cores)
    #[serde(default)]
    pub workers: usize,

    /// Keep-alive timeout in seconds
    #[serde(default = "default_keep_alive")]
    pub keep_alive: u64,

    /// Maximum JSON payload size in bytes
    #[serde(default = "default_max_payload_size")]
    pub max_payload_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("0.0.0.0"),
            port: 8080,
            workers: 0, // Use all CPU cores
            keep_alive: default_keep_alive(),
            max_payload_size: default_max_payload_size(),
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

    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_source(&|key: &str| std::env::var(key).ok())
    }

    /// Load from a key lookup (`SERVER_*` variables)
    pub fn from_source<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            host: string_or(lookup, "SERVER_HOST", &defaults.host),
            port: parse_or(lookup, "SERVER_PORT", defaults.port),
            workers: parse_or(lookup, "SERVER_WORKERS", defaults.workers),
            ..defaults
        }
    }

    /// Get the bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_keep_alive() -> u64 {
    75 // 75 seconds
}

fn default_max_payload_size() -> usize {
    64 * 1024 // 64 KB, the auth endpoints only take small JSON bodies
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config_bind_address() {
        let config = ServerConfig::new("127.0.0.1", 3000);
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
        assert_eq!(config.keep_alive, 75);
    }

    #[test]
    fn test_server_config_from_source() {
        let lookup = |key: &str| match key {
            "SERVER_HOST" => Some("localhost".to_string()),
            "SERVER_PORT" => Some("8443".to_string()),
            _ => None,
        };
        let config = ServerConfig::from_source(&lookup);
        assert_eq!(config.bind_address(), "localhost:8443");
        assert_eq!(config.workers, 0);
    }
}
