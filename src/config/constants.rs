//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 3000;

// =============================================================================
// Database (PostgreSQL)
// =============================================================================

/// Default database host
pub const DEFAULT_PG_HOST: &str = "localhost";

/// Default database port
pub const DEFAULT_PG_PORT: u16 = 5432;

/// Default database name
pub const DEFAULT_PG_DATABASE: &str = "myapp";

/// Default database user
pub const DEFAULT_PG_USER: &str = "postgres";

/// Default database password (development only)
pub const DEFAULT_PG_PASSWORD: &str = "postgres";

// =============================================================================
// Cache (Redis)
// =============================================================================

/// Default Redis URL (for development)
pub const DEFAULT_REDIS_URL: &str = "redis://localhost:6379";

/// Default cache entry TTL in seconds (5 minutes)
pub const DEFAULT_CACHE_TTL_SECONDS: u64 = 300;

/// Cache key for the full user collection
pub const CACHE_KEY_USERS_ALL: &str = "users:all";

/// Cache key prefix for a single user record
pub const CACHE_PREFIX_USER: &str = "users:";

/// Cache key for a single user record
pub fn user_cache_key(id: i32) -> String {
    format!("{}{}", CACHE_PREFIX_USER, id)
}
