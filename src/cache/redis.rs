//! Redis cache
//!
//! Plain `GET`/`SET`/`DEL` over a `bb8` connection pool.

use async_trait::async_trait;
use bb8_redis::{bb8::Pool, redis, RedisConnectionManager};
use tracing::info;

use super::UserCache;
use crate::error::{Result, UserError};

// == Redis Cache ==
/// Cache backed by a Redis server, reached through a pooled connection.
#[derive(Clone)]
pub struct RedisCache {
    pool: Pool<RedisConnectionManager>,
}

impl RedisCache {
    /// Builds the connection pool for `url` (e.g. `redis://localhost:6379`).
    pub async fn connect(url: &str) -> Result<Self> {
        let manager = RedisConnectionManager::new(url).map_err(unavailable)?;
        let pool = Pool::builder().build(manager).await.map_err(unavailable)?;

        info!("Connected to Redis at {}", url);
        Ok(Self { pool })
    }
}

#[async_trait]
impl UserCache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.pool.get().await.map_err(unavailable)?;
        let value: Option<String> = redis::cmd("GET")
            .arg(key)
            .query_async(&mut *conn)
            .await
            .map_err(unavailable)?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut conn = self.pool.get().await.map_err(unavailable)?;
        let _: () = redis::cmd("SET")
            .arg(key)
            .arg(value)
            .query_async(&mut *conn)
            .await
            .map_err(unavailable)?;
        Ok(())
    }

    async fn del(&self, key: &str) -> Result<()> {
        let mut conn = self.pool.get().await.map_err(unavailable)?;
        let _: i64 = redis::cmd("DEL")
            .arg(key)
            .query_async(&mut *conn)
            .await
            .map_err(unavailable)?;
        Ok(())
    }
}

fn unavailable(err: impl std::fmt::Display) -> UserError {
    UserError::unavailable(format!("redis: {}", err))
}
