//! Cache Module
//!
//! Best-effort key/value cache sitting beside the store. Keys are user
//! emails, values are the JSON-serialized records. No TTL is applied.

mod memory;
#[cfg(feature = "redis")]
mod redis;

use async_trait::async_trait;

use crate::error::Result;

pub use memory::MemoryCache;
#[cfg(feature = "redis")]
pub use redis::RedisCache;

// == User Cache ==
/// String-to-string cache used for cache-aside reads and writes.
#[async_trait]
pub trait UserCache: Send + Sync {
    /// Returns the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing a missing key is not an error.
    async fn del(&self, key: &str) -> Result<()>;
}
