//! # Cache Configuration
//!
//! Environment-based configuration for the cache client.

use std::env;

const DEFAULT_ADDR: &str = "127.0.0.1:6379";

/// Cache server connection configuration.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Server address as `host:port`
    pub addr: String,

    /// Authentication credential; `None` when the server requires none
    pub password: Option<String>,

    /// Logical database index
    pub db: i64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
            password: None,
            db: 0,
        }
    }
}

impl CacheConfig {
    /// Load configuration from environment variables.
    ///
    /// Recognized variables: `REDIS_ADDR`, `REDIS_PASSWORD`, `REDIS_DB`.
    /// Unset or unparseable values fall back to the defaults; an empty
    /// password counts as unset.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            addr: env::var("REDIS_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string()),

            password: env::var("REDIS_PASSWORD").ok().filter(|p| !p.is_empty()),

            db: env::var("REDIS_DB")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
        }
    }

    /// Connection URL consumed by the redis driver.
    #[must_use]
    pub fn connection_url(&self) -> String {
        match &self.password {
            Some(password) => format!("redis://:{password}@{}/{}", self.addr, self.db),
            None => format!("redis://{}/{}", self.addr, self.db),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_targets_local_server() {
        let config = CacheConfig::default();
        assert_eq!(config.addr, "127.0.0.1:6379");
        assert_eq!(config.db, 0);
        assert!(config.password.is_none());
    }

    #[test]
    fn test_url_without_password() {
        let config = CacheConfig::default();
        assert_eq!(config.connection_url(), "redis://127.0.0.1:6379/0");
    }

    #[test]
    fn test_url_with_password_and_db() {
        let config = CacheConfig {
            addr: "10.0.0.5:6380".to_string(),
            password: Some("hunter2".to_string()),
            db: 3,
        };
        assert_eq!(config.connection_url(), "redis://:hunter2@10.0.0.5:6380/3");
    }
}
