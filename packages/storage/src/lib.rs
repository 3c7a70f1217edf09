// ABOUTME: Storage foundation for Groundwork packages
// ABOUTME: Shared error taxonomy, connection pool setup, and ID generation

use std::path::Path;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::debug;

pub mod ids;

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Database error: {0}")]
    Database(String),
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("Sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Record not found")]
    NotFound,
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Validation error: {0}")]
    Validation(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Opens (creating if missing) the SQLite database at `path` with foreign
/// keys enforced. Migrations are run by the caller, which embeds this
/// package's `migrations/` directory via `sqlx::migrate!`.
pub async fn connect(path: &Path) -> StorageResult<SqlitePool> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(StorageError::Io)?;
    }

    debug!("Opening SQLite database at {}", path.display());

    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect_with(options)
        .await
        .map_err(StorageError::Sqlx)?;

    Ok(pool)
}

/// In-memory pool for tests. Limited to a single connection so every
/// query sees the same database.
pub async fn connect_in_memory() -> StorageResult<SqlitePool> {
    use std::str::FromStr;

    let options = SqliteConnectOptions::from_str(":memory:")
        .map_err(StorageError::Sqlx)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .map_err(StorageError::Sqlx)?;

    Ok(pool)
}
