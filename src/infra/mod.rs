//! Infrastructure layer - External systems integration
//!
//! This module handles the external system concerns:
//! - Database connection and repositories (PostgreSQL via SeaORM)
//! - Caching (Redis)

pub mod cache;
pub mod db;
pub mod repositories;

pub use cache::{CacheStore, RedisCache};
pub use db::Database;
pub use repositories::{UserRepository, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use cache::MockCacheStore;
#[cfg(any(test, feature = "test-utils"))]
pub use repositories::MockUserRepository;
