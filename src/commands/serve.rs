//! Serve command - wires the store, cache and router, then listens.

use std::sync::Arc;

use tokio::net::TcpListener;

use crate::api::{create_router, AppState};
use crate::cli::args::ServeArgs;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::{Database, RedisCache};

/// Execute the serve command
pub async fn execute(args: ServeArgs, config: Config) -> AppResult<()> {
    // Both clients are owned here and handed to the state; a failure of
    // either at startup is fatal rather than degraded.
    let database = Database::connect(&config)
        .await
        .map_err(|e| AppError::internal(format!("database unavailable: {}", e)))?;

    let cache = RedisCache::try_connect(&config)
        .await
        .map_err(|e| AppError::internal(format!("redis unavailable: {}", e)))?;

    let state = AppState::from_config(Arc::new(database), Arc::new(cache), &config);
    let router = create_router(state);

    let addr = format!("{}:{}", args.host, args.port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("cannot bind {}: {}", addr, e)))?;

    tracing::info!("listening on http://{}", addr);

    axum::serve(listener, router)
        .await
        .map_err(|e| AppError::internal(format!("server exited: {}", e)))
}
