//! Opening the substation database.

use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::error::StorageError;

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Where the registry lives.
pub struct Config {
    /// sqlx `SQLite` URL, e.g. `sqlite:substations.db?mode=rwc`. Use
    /// `sqlite::memory:` for a throwaway registry.
    pub database_url: String,
}

impl Config {
    /// Open the registry and migrate the `substations` table.
    ///
    /// # Errors
    ///
    /// [`StorageError::Open`] for a bad URL or unreachable file,
    /// [`StorageError::Migration`] when the schema cannot be applied.
    pub async fn build(self) -> Result<Database, StorageError> {
        Database::open(&self.database_url).await
    }
}

/// An open, migrated registry database.
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    async fn open(database_url: &str) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(StorageError::Open)?
            .create_if_missing(true);

        // Callers wait at most this long for a connection before the
        // request fails with a storage error.
        let pool = SqlitePoolOptions::new()
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect_with(options)
            .await
            .map_err(StorageError::Open)?;

        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::debug!(url = database_url, "substation registry opened");

        Ok(Self { pool })
    }

    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
