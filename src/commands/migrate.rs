//! Migrate command - explicit schema management.

use crate::cli::args::{MigrateAction, MigrateArgs};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::Database;

/// Execute the migrate command
pub async fn execute(args: MigrateArgs, config: Config) -> AppResult<()> {
    // Open without auto-migrating; which direction to move the schema is
    // exactly what the subcommand decides.
    let db = Database::open(&config)
        .await
        .map_err(|e| AppError::internal(format!("database unavailable: {}", e)))?;

    let outcome = match args.action {
        MigrateAction::Up => db.migrate_up().await,
        MigrateAction::Down => db.migrate_down().await,
        MigrateAction::Status => db.migration_status().await,
    };

    outcome.map_err(|e| AppError::internal(format!("migration failed: {}", e)))
}
