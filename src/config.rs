//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Default TTL in seconds for cached amenity lists
    pub amenity_ttl: u64,
    /// Local tier sweep interval in seconds
    pub sweep_interval: u64,
    /// Radius in meters used when a request names none
    pub default_radius: u32,
    /// Shared cache tier settings
    pub redis: RedisSettings,
}

/// Connection settings for the shared Redis tier.
#[derive(Debug, Clone)]
pub struct RedisSettings {
    /// When false the cache never tries Redis
    pub enabled: bool,
    pub host: String,
    pub port: u16,
    pub password: Option<String>,
    /// Bound on each connection attempt and each remote call
    pub timeout: Duration,
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `AMENITY_CACHE_TTL` - Amenity entry TTL in seconds (default: 7200)
    /// - `CACHE_SWEEP_INTERVAL` - Local sweep frequency in seconds (default: 600)
    /// - `DEFAULT_SEARCH_RADIUS` - Default radius in meters (default: 5000)
    /// - `REDIS_ENABLED` - Anything but `false` enables Redis (default: enabled)
    /// - `REDIS_HOST` / `REDIS_PORT` - Redis address (default: localhost:6379)
    /// - `REDIS_PASSWORD` - Optional Redis password
    /// - `REDIS_TIMEOUT_MS` - Per-call Redis bound in milliseconds (default: 2000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env_or("SERVER_PORT", defaults.server_port),
            amenity_ttl: env_or("AMENITY_CACHE_TTL", defaults.amenity_ttl),
            sweep_interval: env_or("CACHE_SWEEP_INTERVAL", defaults.sweep_interval),
            default_radius: env_or("DEFAULT_SEARCH_RADIUS", defaults.default_radius),
            redis: RedisSettings {
                enabled: env::var("REDIS_ENABLED").map_or(true, |v| v != "false"),
                host: env::var("REDIS_HOST").unwrap_or(defaults.redis.host),
                port: env_or("REDIS_PORT", defaults.redis.port),
                password: env::var("REDIS_PASSWORD").ok().filter(|p| !p.is_empty()),
                timeout: Duration::from_millis(env_or("REDIS_TIMEOUT_MS", 2000)),
            },
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            amenity_ttl: 7200,
            sweep_interval: 600,
            default_radius: 5000,
            redis: RedisSettings {
                enabled: true,
                host: "localhost".to_string(),
                port: 6379,
                password: None,
                timeout: Duration::from_millis(2000),
            },
        }
    }
}
