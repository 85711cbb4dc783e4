/// Core error types for the audiobook toolkit
use thiserror::Error;
use crate::types::{AudiobookId, PlaylistId, TrackId};

/// Result type alias using `AudiobookError`
pub type Result<T> = std::result::Result<T, AudiobookError>;

/// Core error type
///
/// `Validation` failures are raised before any store call is made.
/// Store-side failures surface as `Store`, `Database` or one of the
/// not-found variants. `Upload` covers object storage failures for a
/// single file.
#[derive(Error, Debug)]
pub enum AudiobookError {
    /// Input rejected locally (empty name, wrong file type, oversized file)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Backing store rejected or failed an operation
    #[error("Store error: {0}")]
    Store(String),

    /// Object storage failed to accept a blob
    #[error("Upload error: {0}")]
    Upload(String),

    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Track not found
    #[error("Track not found: {0}")]
    TrackNotFound(TrackId),

    /// Audiobook not found
    #[error("Audiobook not found: {0}")]
    AudiobookNotFound(AudiobookId),

    /// Playlist not found
    #[error("Playlist not found: {0}")]
    PlaylistNotFound(PlaylistId),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// Database errors (for store implementations)
    #[error("Database error: {0}")]
    Database(String),
}

impl AudiobookError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a store error
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }

    /// Create an upload error
    pub fn upload(msg: impl Into<String>) -> Self {
        Self::Upload(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Whether the error was raised locally without touching any store
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for AudiobookError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}
