//! User service - cache-aside orchestration over the store of record.
//!
//! Reads check the cache first and fall back to the store, populating the
//! cache on a miss. Writes mutate the store first and then invalidate the
//! affected cache entries. The store stays authoritative throughout: the
//! worst cache failure mode is staleness bounded by the entry TTL, never
//! corruption.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

use crate::config::{user_cache_key, CACHE_KEY_USERS_ALL};
use crate::domain::User;
use crate::errors::{AppResult, OptionExt};
use crate::infra::{CacheStore, UserRepository};

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// List all users, ordered by id ascending
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Get a user by id
    async fn get_user(&self, id: i32) -> AppResult<User>;

    /// Create a new user
    async fn create_user(&self, name: String, email: String) -> AppResult<User>;

    /// Update an existing user, returning the post-write record
    async fn update_user(&self, id: i32, name: String, email: String) -> AppResult<User>;

    /// Delete a user, returning the deleted id
    async fn delete_user(&self, id: i32) -> AppResult<i32>;
}

/// Concrete implementation of UserService with a lookaside cache.
///
/// The policy is strictly invalidate-on-write, populate-on-read-miss; the
/// service never writes a value it computed itself into the cache during a
/// mutation. Invalidation runs after the store commit, so a reader that
/// misses the cache sees data at least as fresh as one that hits it, except
/// within the TTL-bounded window a failed invalidation leaves behind.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
    cache: Arc<dyn CacheStore>,
    cache_ttl: u64,
}

impl UserManager {
    /// Create a new service instance over the given store and cache.
    pub fn new(repo: Arc<dyn UserRepository>, cache: Arc<dyn CacheStore>, cache_ttl: u64) -> Self {
        Self {
            repo,
            cache,
            cache_ttl,
        }
    }

    /// Look up a cached snapshot. Read errors and undecodable entries are
    /// treated as a miss; a cache failure must never fail a read.
    async fn cache_fetch<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.cache.get(key).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::warn!(key, error = %e, "discarding undecodable cache entry");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(key, error = %e, "cache read failed, falling back to store");
                None
            }
        }
    }

    /// Store a snapshot under `key`. Best-effort: failures are logged and
    /// swallowed, leaving the entry absent until the next read miss.
    async fn cache_put<T: Serialize>(&self, key: &str, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to serialize cache snapshot");
                return;
            }
        };

        if let Err(e) = self.cache.set(key, &raw, self.cache_ttl).await {
            tracing::warn!(key, error = %e, "cache write failed, entry not stored");
        }
    }

    /// Delete the entry under `key`. Idempotent and best-effort: a failed
    /// invalidation leaves a stale entry until its TTL expires, and never
    /// rolls back the store mutation it follows.
    async fn invalidate(&self, key: &str) {
        if let Err(e) = self.cache.delete(key).await {
            tracing::warn!(key, error = %e, "cache invalidation failed, entry stale until expiry");
        }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn list_users(&self) -> AppResult<Vec<User>> {
        if let Some(users) = self.cache_fetch::<Vec<User>>(CACHE_KEY_USERS_ALL).await {
            tracing::debug!("cache hit for user collection");
            return Ok(users);
        }

        let users = self.repo.list().await?;
        self.cache_put(CACHE_KEY_USERS_ALL, &users).await;

        Ok(users)
    }

    async fn get_user(&self, id: i32) -> AppResult<User> {
        let key = user_cache_key(id);

        if let Some(user) = self.cache_fetch::<User>(&key).await {
            tracing::debug!(id, "cache hit for user");
            return Ok(user);
        }

        // A missing row propagates NotFound without populating the cache.
        let user = self.repo.find_by_id(id).await?.ok_or_not_found()?;
        self.cache_put(&key, &user).await;

        Ok(user)
    }

    async fn create_user(&self, name: String, email: String) -> AppResult<User> {
        let user = self.repo.create(name, email).await?;

        // No single-record entry can exist for a fresh id; only the
        // collection snapshot is out of date.
        self.invalidate(CACHE_KEY_USERS_ALL).await;

        tracing::debug!(id = user.id, "user created");
        Ok(user)
    }

    async fn update_user(&self, id: i32, name: String, email: String) -> AppResult<User> {
        let user = self.repo.update(id, name, email).await?;

        self.invalidate(&user_cache_key(id)).await;
        self.invalidate(CACHE_KEY_USERS_ALL).await;

        tracing::debug!(id, "user updated");
        Ok(user)
    }

    async fn delete_user(&self, id: i32) -> AppResult<i32> {
        self.repo.delete(id).await?;

        self.invalidate(&user_cache_key(id)).await;
        self.invalidate(CACHE_KEY_USERS_ALL).await;

        tracing::debug!(id, "user deleted");
        Ok(id)
    }
}
