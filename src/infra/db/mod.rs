//! PostgreSQL access for the user store.

use sea_orm::{ConnectionTrait, Database as SeaDatabase, DatabaseConnection, DbErr, Statement};
use sea_orm_migration::MigratorTrait;

use crate::config::Config;

pub mod migrations;

pub use migrations::Migrator;

/// Owned handle on the store of record.
///
/// The process opens one connection pool at startup and shares clones of it
/// with the repository; SeaORM's pool provides the synchronization. The
/// schema is a single `users` table, so the migration surface below is the
/// whole of it: apply, roll back one step, report.
#[derive(Clone)]
pub struct Database {
    connection: DatabaseConnection,
}

impl Database {
    /// Open the connection pool and bring the schema up to date.
    pub async fn connect(config: &Config) -> Result<Self, DbErr> {
        let db = Self::open(config).await?;
        Migrator::up(&db.connection, None).await?;
        tracing::info!("database connected, schema up to date");
        Ok(db)
    }

    /// Open the connection pool without touching the schema. The migrate
    /// command uses this so schema changes stay explicit.
    pub async fn open(config: &Config) -> Result<Self, DbErr> {
        let connection = SeaDatabase::connect(&config.database_url).await?;
        Ok(Self { connection })
    }

    /// Wrap an existing connection (test injection).
    pub fn from_connection(connection: DatabaseConnection) -> Self {
        Self { connection }
    }

    /// Clone of the underlying connection for repository construction.
    pub fn get_connection(&self) -> DatabaseConnection {
        self.connection.clone()
    }

    /// Apply pending migrations.
    pub async fn migrate_up(&self) -> Result<(), DbErr> {
        Migrator::up(&self.connection, None).await
    }

    /// Roll back the most recent migration.
    pub async fn migrate_down(&self) -> Result<(), DbErr> {
        Migrator::down(&self.connection, Some(1)).await
    }

    /// Log the applied/pending state of every known migration.
    pub async fn migration_status(&self) -> Result<(), DbErr> {
        Migrator::status(&self.connection).await
    }

    /// Cheap connectivity probe used by the health endpoint.
    pub async fn ping(&self) -> Result<(), DbErr> {
        let probe = Statement::from_string(
            self.connection.get_database_backend(),
            "SELECT 1".to_owned(),
        );
        self.connection.execute(probe).await.map(|_| ())
    }
}
