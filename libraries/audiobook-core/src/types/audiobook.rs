//! Audiobook types
//!
//! The audiobook is the aggregate root: deleting it removes all of its tracks.

use super::ids::AudiobookId;
use super::thumbnail::ThumbnailPosition;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An audiobook
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Audiobook {
    pub id: AudiobookId,
    pub name: String,
    pub author: Option<String>,
    pub description: Option<String>,
    pub created_date: NaiveDate,
    pub thumbnail_url: Option<String>,
    pub thumbnail_position: ThumbnailPosition,
    pub created_at: String,
    /// Number of tracks, derived when loading
    pub track_count: u32,
}

/// Data for creating a new audiobook
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateAudiobook {
    pub name: String,
    pub author: Option<String>,
    pub description: Option<String>,
    pub created_date: NaiveDate,
    pub thumbnail_position: ThumbnailPosition,
}

/// Data for updating an audiobook
///
/// Editable fields are replaced as a whole; `thumbnail_url` is only written
/// when set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateAudiobook {
    pub name: String,
    pub author: Option<String>,
    pub description: Option<String>,
    pub created_date: NaiveDate,
    pub thumbnail_position: ThumbnailPosition,
    pub thumbnail_url: Option<String>,
}

impl UpdateAudiobook {
    /// Update that keeps every field of `audiobook` and only sets the thumbnail
    pub fn thumbnail_only(audiobook: &Audiobook, thumbnail_url: impl Into<String>) -> Self {
        Self {
            name: audiobook.name.clone(),
            author: audiobook.author.clone(),
            description: audiobook.description.clone(),
            created_date: audiobook.created_date,
            thumbnail_position: audiobook.thumbnail_position,
            thumbnail_url: Some(thumbnail_url.into()),
        }
    }
}
