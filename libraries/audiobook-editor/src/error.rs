//! Error types for editing sessions

use crate::ordering::RenumberPhase;
use audiobook_core::{AudiobookError, TrackId};
use thiserror::Error;

/// Editor errors
#[derive(Debug, Error)]
pub enum EditorError {
    /// Input rejected before any store call
    #[error("Validation error: {0}")]
    Validation(String),

    /// Track is not part of the loaded sequence
    #[error("Track not found: {0}")]
    TrackNotFound(TrackId),

    /// A save of the track order has not finished yet
    #[error("Saving track order is already in progress")]
    SaveInProgress,

    /// Store or object storage failure
    #[error(transparent)]
    Store(#[from] AudiobookError),

    /// Renumbering failed; the sequence was reloaded if `reloaded` is set
    #[error("Saving track order failed during {phase}: {source}")]
    OrderSave {
        phase: RenumberPhase,
        source: AudiobookError,
        reloaded: bool,
    },
}

impl EditorError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Whether the error was raised locally without touching any store
    pub fn is_validation(&self) -> bool {
        match self {
            Self::Validation(_) => true,
            Self::Store(e) => e.is_validation(),
            _ => false,
        }
    }
}

/// Result type for editor operations
pub type Result<T> = std::result::Result<T, EditorError>;
