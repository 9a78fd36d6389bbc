//! Users API - user CRUD service with a cache-aside layer
//!
//! A REST service for a single user resource, backed by PostgreSQL as the
//! store of record with a Redis lookaside cache in front of it. Reads are
//! cache-first with populate-on-miss; writes go to the store and invalidate
//! the affected cache entries.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities
//! - **services**: Cache-aside orchestration (the consistency rules live here)
//! - **infra**: Infrastructure concerns (database, cache)
//! - **api**: HTTP handlers and routes
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::User;
pub use errors::{AppError, AppResult};
pub use infra::{CacheStore, RedisCache};
