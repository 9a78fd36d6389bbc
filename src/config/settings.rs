//! Application settings loaded from environment variables.

use std::env;

use super::constants::{
    DEFAULT_CACHE_TTL_SECONDS, DEFAULT_PG_DATABASE, DEFAULT_PG_HOST, DEFAULT_PG_PASSWORD,
    DEFAULT_PG_PORT, DEFAULT_PG_USER, DEFAULT_REDIS_URL, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    pub cache_ttl_seconds: u64,
    pub server_host: String,
    pub server_port: u16,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("redis_url", &"[REDACTED]")
            .field("cache_ttl_seconds", &self.cache_ttl_seconds)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Read once at process start; there is no hot-reload. `DATABASE_URL`
    /// takes precedence over the individual `PG_*` variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| Self::database_url_from_parts());

        Self {
            database_url,
            redis_url: env::var("REDIS_URL").unwrap_or_else(|_| DEFAULT_REDIS_URL.to_string()),
            cache_ttl_seconds: env::var("CACHE_TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_CACHE_TTL_SECONDS),
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SERVER_PORT),
        }
    }

    /// Compose a connection URL from the individual `PG_*` variables.
    fn database_url_from_parts() -> String {
        let host = env::var("PG_HOST").unwrap_or_else(|_| DEFAULT_PG_HOST.to_string());
        let port = env::var("PG_PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PG_PORT);
        let database = env::var("PG_DATABASE").unwrap_or_else(|_| DEFAULT_PG_DATABASE.to_string());
        let user = env::var("PG_USER").unwrap_or_else(|_| DEFAULT_PG_USER.to_string());
        let password = env::var("PG_PASSWORD").unwrap_or_else(|_| DEFAULT_PG_PASSWORD.to_string());

        format!("postgres://{}:{}@{}:{}/{}", user, password, host, port, database)
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
