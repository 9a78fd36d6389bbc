//! Application state - Dependency injection container.
//!
//! The process owns the database and cache clients and hands them to the
//! services here; nothing reaches for ambient globals.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::{CacheStore, Database, RedisCache, UserStore};
use crate::services::{UserManager, UserService};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// User service (cache-aside over store and cache)
    pub user_service: Arc<dyn UserService>,
    /// Database connection
    pub database: Arc<Database>,
    /// Cache store
    pub cache: Arc<dyn CacheStore>,
}

impl AppState {
    /// Create application state from the connected clients and config.
    pub fn from_config(database: Arc<Database>, cache: Arc<RedisCache>, config: &Config) -> Self {
        let repo = Arc::new(UserStore::new(database.get_connection()));
        let cache: Arc<dyn CacheStore> = cache;
        let user_service = Arc::new(UserManager::new(
            repo,
            cache.clone(),
            config.cache_ttl_seconds,
        ));

        Self {
            user_service,
            database,
            cache,
        }
    }

    /// Create application state with manually injected services (tests).
    pub fn new(
        user_service: Arc<dyn UserService>,
        database: Arc<Database>,
        cache: Arc<dyn CacheStore>,
    ) -> Self {
        Self {
            user_service,
            database,
            cache,
        }
    }
}
