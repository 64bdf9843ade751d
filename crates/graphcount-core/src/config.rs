//! Configuration types for graphcount components.
//!
//! All values here are plain structs with `Default` implementations. The
//! binaries build them once at startup from CLI arguments and environment
//! variables and hand them down; nothing reads configuration lazily.

use std::time::Duration;

use crate::error::AppError;

/// Default Redis key holding the precomputed fleet rollup.
pub const DEFAULT_ROLLUP_KEY: &str = "graph_count";

/// Database connection pool configuration.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub max_connections: u32,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self { max_connections: 5 }
    }
}

/// HTTP client configuration for graph engine calls.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub timeout: Duration,
    pub max_retries: u32,
    pub retry_base_delay: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_retries: 3,
            retry_base_delay: Duration::from_millis(500),
        }
    }
}

/// Rollup cache configuration.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Redis connection URL, including the database index (`redis://host:6379/0`).
    pub url: String,
    /// Key holding the rollup document.
    pub key: String,
    /// Upper bound for establishing a connection before giving up.
    pub connect_timeout: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: "redis://127.0.0.1:6379/0".to_string(),
            key: DEFAULT_ROLLUP_KEY.to_string(),
            connect_timeout: Duration::from_secs(2),
        }
    }
}

impl CacheConfig {
    /// Creates a cache configuration for the given URL with default key and timeout.
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Overrides the rollup key.
    ///
    /// # Errors
    ///
    /// Returns `AppError::ConfigError` for an empty or blank key.
    pub fn with_key(mut self, key: &str) -> Result<Self, AppError> {
        let key = key.trim();
        if key.is_empty() {
            return Err(AppError::ConfigError(
                "Rollup cache key must not be empty".to_string(),
            ));
        }
        self.key = key.to_string();
        Ok(self)
    }
}
