/// Media-specific errors
use thiserror::Error;

/// Result type alias using `MediaError`
pub type Result<T> = std::result::Result<T, MediaError>;

/// Media error types
#[derive(Error, Debug)]
pub enum MediaError {
    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Only MP3 files can be uploaded as tracks
    #[error("Unsupported format: {0} is not an MP3 file")]
    UnsupportedFormat(String),

    /// Cover images must be images
    #[error("Not an image: {0}")]
    NotAnImage(String),

    /// File exceeds the size limit
    #[error("{file} is {size}, the limit is {limit}")]
    TooLarge {
        file: String,
        size: String,
        limit: String,
    },

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Lofty error
    #[error(transparent)]
    Lofty(#[from] lofty::error::LoftyError),
}

impl From<MediaError> for audiobook_core::AudiobookError {
    fn from(err: MediaError) -> Self {
        match err {
            MediaError::Io(e) => Self::Io(e),
            other => Self::validation(other.to_string()),
        }
    }
}
