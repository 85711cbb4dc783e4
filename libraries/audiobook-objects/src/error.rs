//! Error types for object storage.

use audiobook_core::AudiobookError;
use thiserror::Error;

/// Errors raised while storing a blob.
#[derive(Error, Debug)]
pub enum ObjectStoreError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Storage endpoint rejected the upload
    #[error("Storage error ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// Invalid endpoint or public base URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// S3 request failed before the bucket answered
    #[error("S3 request failed: {0}")]
    S3(String),

    /// Bucket name missing
    #[error("Invalid bucket name: {0:?}")]
    InvalidBucket(String),

    /// Key would escape the storage root
    #[error("Invalid object key: {0}")]
    InvalidKey(String),

    /// IO error while writing a local blob
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for object storage operations.
pub type Result<T> = std::result::Result<T, ObjectStoreError>;

impl From<ObjectStoreError> for AudiobookError {
    fn from(err: ObjectStoreError) -> Self {
        Self::upload(err.to_string())
    }
}
