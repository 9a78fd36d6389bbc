//! Redis cache store.
//!
//! The cache holds serialized snapshots keyed by query shape. Consumers go
//! through the narrow `CacheStore` contract so the service layer can be
//! tested against an in-memory fake.

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, Client, RedisError};

use crate::config::Config;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Key-value cache contract.
///
/// `delete` is idempotent: removing an absent key is not an error. No
/// atomicity is guaranteed across calls on different keys.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Get the value stored under `key`, or `None` if absent or expired.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Store `value` under `key` with an expiry of `ttl_seconds`.
    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> AppResult<()>;

    /// Remove the entry under `key`, if any.
    async fn delete(&self, key: &str) -> AppResult<()>;
}

/// Redis-backed `CacheStore` with connection pooling.
#[derive(Clone)]
pub struct RedisCache {
    connection: ConnectionManager,
}

impl RedisCache {
    /// Connect to Redis and return a pooled cache handle.
    pub async fn try_connect(config: &Config) -> Result<Self, RedisError> {
        let client = Client::open(config.redis_url.as_str())?;
        let connection = ConnectionManager::new(client).await?;

        tracing::info!("Redis cache connected");

        Ok(Self { connection })
    }
}

#[async_trait]
impl CacheStore for RedisCache {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let mut conn = self.connection.clone();
        let value: Option<String> = conn.get(key).await.map_err(cache_error)?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> AppResult<()> {
        let mut conn = self.connection.clone();
        conn.set_ex::<_, _, ()>(key, value, ttl_seconds)
            .await
            .map_err(cache_error)?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let mut conn = self.connection.clone();
        let _: () = conn.del(key).await.map_err(cache_error)?;
        Ok(())
    }
}

/// Convert Redis error to AppError.
fn cache_error(e: RedisError) -> AppError {
    tracing::error!("Redis error: {}", e);
    AppError::cache(e.to_string())
}
