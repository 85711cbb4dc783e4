/// Admin error types
use audiobook_core::AudiobookError;
use audiobook_objects::ObjectStoreError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AdminError>;

#[derive(Debug, Error)]
pub enum AdminError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Object storage error: {0}")]
    Objects(#[from] ObjectStoreError),

    #[error(transparent)]
    Core(#[from] AudiobookError),
}
