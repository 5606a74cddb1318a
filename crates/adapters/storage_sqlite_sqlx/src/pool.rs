//! Opening the geostore database.
//!
//! The schema lives in `migrations/` and is embedded into the binary, so a
//! [`Database`] is only handed out once the `points` and `polygons` tables
//! exist.

use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;

use crate::error::StorageError;

/// Where the record store lives.
pub struct Config {
    /// `sqlx` URL such as `sqlite:geostore.db?mode=rwc` or `sqlite::memory:`.
    pub database_url: String,
}

impl Config {
    /// Open the store, creating the file on first use, and bring the schema
    /// up to date.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the URL cannot be parsed, the file cannot
    /// be opened, or a migration fails.
    pub async fn build(self) -> Result<Database, StorageError> {
        let options =
            SqliteConnectOptions::from_str(&self.database_url)?.create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await?;

        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!(url = %self.database_url, "record store opened");

        Ok(Database { pool })
    }
}

/// A migrated record store, shared by the repositories through its pool.
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
