//! Remote Tier Module
//!
//! Shared Redis-backed tier. Values are stored as JSON under the same
//! storage keys the local tier uses, with Redis handling expiry natively.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client, ConnectionAddr, ConnectionInfo, RedisConnectionInfo};
use tokio::time::{sleep, timeout};
use tracing::{debug, info, warn};

use crate::cache::CacheTier;
use crate::config::RedisSettings;
use crate::error::TierError;
use crate::models::PointOfInterest;

/// Connection attempts made at startup before running local-only.
pub const MAX_CONNECT_ATTEMPTS: u32 = 3;

// == Redis Tier ==
/// Redis-backed [`CacheTier`].
///
/// `ConnectionManager` is cheap to clone and multiplexes commands over one
/// connection, so each call clones it instead of taking a lock.
#[derive(Clone)]
pub struct RedisTier {
    conn: ConnectionManager,
}

impl RedisTier {
    // == Connect ==
    /// Opens a connection, retrying up to [`MAX_CONNECT_ATTEMPTS`] times.
    ///
    /// Each attempt is bounded by `settings.timeout`; attempts are spaced by
    /// `min(attempt * 50ms, 500ms)`.
    pub async fn connect(settings: &RedisSettings) -> Result<Self, TierError> {
        let client = Client::open(connection_info(settings))?;
        let mut attempt = 0;

        loop {
            attempt += 1;
            let err = match timeout(settings.timeout, ConnectionManager::new(client.clone())).await
            {
                Ok(Ok(conn)) => {
                    info!(
                        "Redis connected at {}:{} (attempt {})",
                        settings.host, settings.port, attempt
                    );
                    return Ok(Self { conn });
                }
                Ok(Err(e)) => TierError::Redis(e),
                Err(_) => TierError::Timeout(settings.timeout),
            };

            if attempt >= MAX_CONNECT_ATTEMPTS {
                return Err(err);
            }

            warn!("Redis connection attempt {} failed: {}", attempt, err);
            sleep(reconnect_delay(attempt)).await;
        }
    }
}

/// Connection target built field by field, so credentials are never parsed
/// out of a URL.
fn connection_info(settings: &RedisSettings) -> ConnectionInfo {
    ConnectionInfo {
        addr: ConnectionAddr::Tcp(settings.host.clone(), settings.port),
        redis: RedisConnectionInfo {
            password: settings.password.clone(),
            ..Default::default()
        },
    }
}

/// `KEYS` pattern matching every storage key under `prefix`.
fn prefix_pattern(prefix: &str) -> String {
    format!("{}*", prefix)
}

/// Backoff before the next connection attempt.
fn reconnect_delay(attempt: u32) -> Duration {
    Duration::from_millis(u64::from(attempt * 50).min(500))
}

#[async_trait]
impl CacheTier for RedisTier {
    fn name(&self) -> &'static str {
        "redis"
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<PointOfInterest>>, TierError> {
        let mut conn = self.conn.clone();
        let raw: Option<String> = conn.get(key).await?;

        match raw {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn set(
        &self,
        key: &str,
        places: &[PointOfInterest],
        ttl_seconds: u64,
    ) -> Result<(), TierError> {
        let mut conn = self.conn.clone();
        let json = serde_json::to_string(places)?;

        let _: () = conn.set_ex(key, json, ttl_seconds).await?;
        Ok(())
    }

    async fn remove_prefix(&self, prefix: &str) -> Result<usize, TierError> {
        let mut conn = self.conn.clone();
        let pattern = prefix_pattern(prefix);

        let keys: Vec<String> = conn.keys(&pattern).await?;
        if keys.is_empty() {
            return Ok(0);
        }

        let removed: usize = conn.del(&keys).await?;
        debug!("Redis removed {} keys matching {}", removed, pattern);
        Ok(removed)
    }
}
