//! Audiobook Storage
//!
//! `SQLite` database layer for audiobooks, tracks, playlists and client
//! settings.
//!
//! # Architecture
//!
//! - **Vertical Slicing**: Each table family owns its own queries (`audiobooks`, `tracks`, ...)
//! - **Uniqueness**: `tracks` enforces `UNIQUE(audiobook_id, track_number)`
//! - **Transactions**: renumbering can run atomically, see [`SqliteStore`]
//!
//! # Example
//!
//! ```rust,no_run
//! use audiobook_storage::{SqliteStore, create_pool, run_migrations};
//! use audiobook_core::{AudiobookStore, TrackStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://audiobooks.db").await?;
//! run_migrations(&pool).await?;
//!
//! let store = SqliteStore::new(pool);
//! for audiobook in store.get_audiobooks().await? {
//!     let tracks = store.get_tracks(&audiobook.id).await?;
//!     println!("{}: {} tracks", audiobook.name, tracks.len());
//! }
//! # Ok(())
//! # }
//! ```

mod context;
mod error;

// Vertical slices
pub mod audiobooks;
pub mod playlists;
pub mod tracks;

// Client state
pub mod settings;

pub use context::SqliteStore;
pub use error::StorageError;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// Call once at startup to bring the schema up to date.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://audiobooks.db>`)
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!(database_url, "Creating SQLite pool");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    tracing::debug!("SQLite pool ready");

    Ok(pool)
}
