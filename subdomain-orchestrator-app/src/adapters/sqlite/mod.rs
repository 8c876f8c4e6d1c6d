//! SQLite-based tracking store using `SeaORM`.

pub(crate) mod entity;
mod migration;
mod tracking_repo;

use std::path::Path;

use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use subdomain_orchestrator_core::error::{CoreError, CoreResult};

use migration::Migrator;

/// SQLite-backed implementation of the core `TrackingStore` trait.
///
/// Holds the subdomain registry, the append-only creation log, and the
/// deletion records in a single database file.
pub struct SqliteStore {
    /// Shared `SeaORM` database connection.
    pub(crate) db: DatabaseConnection,
}

impl SqliteStore {
    /// Open (creating if needed) the database at `db_path` and bring the
    /// schema up to date.
    ///
    /// # Errors
    /// Returns `CoreError::StorageError` if directory creation, database
    /// connection, or schema migration fails.
    pub async fn new(db_path: &Path) -> CoreResult<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| CoreError::StorageError(format!("Failed to create directory: {e}")))?;
        }

        let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
        let db = Database::connect(&db_url)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to connect to SQLite: {e}")))?;

        // Ensure schema is up to date before the store is used.
        Migrator::up(&db, None)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to run migrations: {e}")))?;

        Ok(Self { db })
    }
}
