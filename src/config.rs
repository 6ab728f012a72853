//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;

/// Default database name when `MONGO_DB` is not set
pub const DEFAULT_DATABASE: &str = "user_cache_api";

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// MongoDB connection string; `None` selects the in-memory store
    pub mongo_uri: Option<String>,
    /// MongoDB database name
    pub mongo_database: String,
    /// Redis host; `None` selects the in-memory cache
    pub redis_host: Option<String>,
    /// Redis port
    pub redis_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `PORT` - HTTP server port (default: 3000)
    /// - `MONGO_URI` - MongoDB connection string (default: unset)
    /// - `MONGO_DB` - MongoDB database name (default: `user_cache_api`)
    /// - `REDIS_HOST` - Redis host (default: unset)
    /// - `REDIS_PORT` - Redis port (default: 6379)
    pub fn from_env() -> Self {
        Self {
            server_port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            mongo_uri: non_empty_var("MONGO_URI"),
            mongo_database: non_empty_var("MONGO_DB")
                .unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
            redis_host: non_empty_var("REDIS_HOST"),
            redis_port: env::var("REDIS_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(6379),
        }
    }

    /// Redis connection URL, if a Redis host is configured.
    pub fn redis_url(&self) -> Option<String> {
        self.redis_host
            .as_ref()
            .map(|host| format!("redis://{}:{}", host, self.redis_port))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            mongo_uri: None,
            mongo_database: DEFAULT_DATABASE.to_string(),
            redis_host: None,
            redis_port: 6379,
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
