//! Object key naming
//!
//! Track media lives under `tracks/{audiobook_id}/{track_number}-{timestamp}.mp3`,
//! cover images under `audiobook-thumbnails/{audiobook_id}-{timestamp}.{ext}`.
//! The millisecond timestamp keeps re-uploads of the same number apart.

use crate::types::AudiobookId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Extension used for uploaded track media
pub const TRACK_MEDIA_EXTENSION: &str = "mp3";

/// Key of a blob in object storage
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectKey(String);

impl ObjectKey {
    /// Key for the media of one track
    pub fn track_media(audiobook_id: &AudiobookId, track_number: i64, timestamp_ms: i64) -> Self {
        Self(format!(
            "tracks/{audiobook_id}/{track_number}-{timestamp_ms}.{TRACK_MEDIA_EXTENSION}"
        ))
    }

    /// Key for an audiobook cover image
    pub fn thumbnail(audiobook_id: &AudiobookId, timestamp_ms: i64, extension: &str) -> Self {
        let extension = extension.trim_start_matches('.').to_lowercase();
        Self(format!(
            "audiobook-thumbnails/{audiobook_id}-{timestamp_ms}.{extension}"
        ))
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Key segments, for implementations that map keys onto paths
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|s| !s.is_empty())
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Join a public base URL and a key with exactly one slash between them
pub fn public_url(base_url: &str, key: &ObjectKey) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), key.as_str())
}
