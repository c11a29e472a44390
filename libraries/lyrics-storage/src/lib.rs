//! Lyrics Catalog Storage
//!
//! `SQLite` database layer for the lyrics catalog.
//!
//! # Architecture
//!
//! - **Vertical Slicing**: Each entity owns its own queries (`artists`,
//!   `albums`, `songs`, `lyrics`, `users`)
//! - **Single Transaction Writes**: Reference resolution and the final insert
//!   of a lyric or album commit together (`resolve`)
//! - **Datastore Arithmetic**: Vote counters are updated in place by SQL,
//!   never read-modify-written
//!
//! # Example
//!
//! ```rust,no_run
//! use lyrics_storage::{SqliteCatalog, create_pool, run_migrations};
//! use lyrics_core::{ArtistRepository, PageRequest, filters::ArtistFilter};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://lyrics.db").await?;
//! run_migrations(&pool).await?;
//!
//! let catalog = SqliteCatalog::new(pool);
//! let artists = catalog
//!     .list_artists(&ArtistFilter::default(), PageRequest::default())
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod context;
mod error;

// Vertical slices
pub mod albums;
pub mod artists;
pub mod lyrics;
pub mod songs;
pub mod users;

// Id-or-inline reference resolution
pub mod resolve;

pub use context::SqliteCatalog;
pub use error::StorageError;

pub type Database = SqliteCatalog;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// This should be called once when the application starts to ensure
/// the database schema is up to date.
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), StorageError> {
    MIGRATOR
        .run(pool)
        .await
        .map_err(|e| StorageError::Migration(e.to_string()))
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://lyrics.db>`)
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, StorageError> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!(database_url, "Creating SQLite pool");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        // Cascading deletes depend on this
        .foreign_keys(true)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

    tracing::debug!("SQLite pool created");

    Ok(pool)
}
