//! Redis-backed store for the precomputed fleet rollup.
//!
//! The rollup is a single JSON document ([`FleetAggregate`]) stored under one
//! key. The server only reads it; `graphcount refresh` publishes it.

use std::time::Duration;

use graphcount_core::config::CacheConfig;
use graphcount_core::error::AppError;
use graphcount_core::models::FleetAggregate;
use graphcount_core::traits::StatsCache;
use redis::AsyncCommands;
use redis::aio::MultiplexedConnection;
use tokio::time::timeout;
use tracing::{debug, info};

/// Rollup cache backed by a Redis key.
///
/// A new multiplexed connection is opened per call. Connection failures
/// surface as [`AppError::CacheUnavailable`].
#[derive(Clone)]
pub struct RedisStatsCache {
    client: redis::Client,
    key: String,
    connect_timeout: Duration,
}

impl RedisStatsCache {
    /// Creates a cache handle. No connection is made until the first call.
    ///
    /// # Errors
    ///
    /// Returns `AppError::ConfigError` if the Redis URL cannot be parsed.
    pub fn new(config: &CacheConfig) -> Result<Self, AppError> {
        let client = redis::Client::open(config.url.as_str())
            .map_err(|e| AppError::ConfigError(format!("Invalid REDIS_URL: {}", e)))?;

        Ok(Self {
            client,
            key: config.key.clone(),
            connect_timeout: config.connect_timeout,
        })
    }

    /// The key holding the rollup document.
    pub fn key(&self) -> &str {
        &self.key
    }

    async fn connect(&self) -> Result<MultiplexedConnection, AppError> {
        match timeout(
            self.connect_timeout,
            self.client.get_multiplexed_async_connection(),
        )
        .await
        {
            Ok(Ok(conn)) => Ok(conn),
            Ok(Err(e)) => Err(AppError::CacheUnavailable(format!(
                "cannot connect to Redis: {}",
                e
            ))),
            Err(_) => Err(AppError::CacheUnavailable(format!(
                "connection to Redis timed out after {:?}",
                self.connect_timeout
            ))),
        }
    }

    /// Stores the rollup, optionally expiring it after `ttl`.
    ///
    /// A `ttl` below one second is rounded up to one second.
    pub async fn publish_rollup(
        &self,
        rollup: &FleetAggregate,
        ttl: Option<Duration>,
    ) -> Result<(), AppError> {
        let payload = serde_json::to_string(rollup)?;
        let mut conn = self.connect().await?;

        let written: redis::RedisResult<()> = match ttl {
            Some(ttl) => conn.set_ex(&self.key, payload, ttl.as_secs().max(1)).await,
            None => conn.set(&self.key, payload).await,
        };
        written.map_err(|e| AppError::CacheUnavailable(format!("cannot write rollup: {}", e)))?;

        info!(key = %self.key, ?ttl, "rollup published");
        Ok(())
    }
}

impl StatsCache for RedisStatsCache {
    async fn read_rollup(&self) -> Result<FleetAggregate, AppError> {
        let mut conn = self.connect().await?;
        let raw: Option<String> = conn
            .get(&self.key)
            .await
            .map_err(|e| AppError::CacheUnavailable(format!("cannot read rollup: {}", e)))?;

        debug!(key = %self.key, hit = raw.is_some(), "rollup cache read");
        decode_rollup(&self.key, raw)
    }
}

/// Decodes the stored rollup document.
fn decode_rollup(key: &str, raw: Option<String>) -> Result<FleetAggregate, AppError> {
    let raw = raw.ok_or_else(|| {
        AppError::CacheUnavailable(format!("no rollup cached under key '{}'", key))
    })?;

    serde_json::from_str(&raw).map_err(|e| {
        AppError::CacheUnavailable(format!("rollup under key '{}' is malformed: {}", key, e))
    })
}
