//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;

use tracing::warn;

use crate::cache::EvictionPolicy;

/// Default capacity in bytes (1 MiB)
pub const DEFAULT_CAPACITY: usize = 1024 * 1024;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Cache capacity in bytes of key + value
    pub capacity: usize,
    /// Eviction policy of the cache engine
    pub policy: EvictionPolicy,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Capacity in bytes (default: 1048576)
    /// - `EVICTION_POLICY` - `lru` or `fifo` (default: lru)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            capacity: env::var("CACHE_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.capacity),
            policy: env::var("EVICTION_POLICY")
                .ok()
                .map(|v| parse_policy(&v, defaults.policy))
                .unwrap_or(defaults.policy),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
        }
    }
}

fn parse_policy(raw: &str, fallback: EvictionPolicy) -> EvictionPolicy {
    raw.parse().unwrap_or_else(|err| {
        warn!("{}, falling back to {}", err, fallback);
        fallback
    })
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            policy: EvictionPolicy::Lru,
            server_port: 3000,
        }
    }
}
