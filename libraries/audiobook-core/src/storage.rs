//! Store traits for the relational backend and object storage

use crate::error::{AudiobookError, Result};
use crate::keys::ObjectKey;
use crate::types::{
    Audiobook, AudiobookId, CreateAudiobook, CreatePlaylist, CreateTrack, Playlist, PlaylistId,
    Track, TrackId, TrackNumberAssignment, UpdateAudiobook,
};
use async_trait::async_trait;
use bytes::Bytes;

/// Row operations on the `tracks` table
///
/// Implementations must enforce uniqueness of `(audiobook_id, track_number)`.
#[async_trait]
pub trait TrackStore: Send + Sync {
    /// Get all tracks of an audiobook, ordered by ascending track number
    async fn get_tracks(&self, audiobook_id: &AudiobookId) -> Result<Vec<Track>>;

    /// Highest track number in use for an audiobook, `None` if it has no tracks
    async fn max_track_number(&self, audiobook_id: &AudiobookId) -> Result<Option<i64>>;

    /// Insert an uploaded track
    async fn create_track(&self, track: CreateTrack) -> Result<Track>;

    /// Set the track number of a single track
    async fn set_track_number(&self, id: &TrackId, track_number: i64) -> Result<()>;

    /// Rename a single track
    async fn rename_track(&self, id: &TrackId, name: &str) -> Result<()>;

    /// Delete a track record
    async fn delete_track(&self, id: &TrackId) -> Result<()>;

    /// Whether `renumber_in_transaction` is available
    fn supports_transactions(&self) -> bool {
        false
    }

    /// Apply all assignments atomically, or none of them
    async fn renumber_in_transaction(
        &self,
        audiobook_id: &AudiobookId,
        assignments: &[TrackNumberAssignment],
    ) -> Result<()> {
        let _ = (audiobook_id, assignments);
        Err(AudiobookError::store(
            "Transactional renumbering is not supported by this store",
        ))
    }
}

/// Row operations on the `audiobooks` table
#[async_trait]
pub trait AudiobookStore: Send + Sync {
    /// Get all audiobooks, newest first
    async fn get_audiobooks(&self) -> Result<Vec<Audiobook>>;

    /// Get audiobook by ID
    async fn get_audiobook(&self, id: &AudiobookId) -> Result<Option<Audiobook>>;

    /// Create a new audiobook
    async fn create_audiobook(&self, audiobook: CreateAudiobook) -> Result<Audiobook>;

    /// Update an audiobook
    async fn update_audiobook(&self, id: &AudiobookId, audiobook: UpdateAudiobook)
        -> Result<Audiobook>;

    /// Delete an audiobook together with its tracks
    async fn delete_audiobook(&self, id: &AudiobookId) -> Result<()>;
}

/// Read side of playlists, used by the embeddable player
#[async_trait]
pub trait PlaylistStore: Send + Sync {
    /// Get playlist by ID
    async fn get_playlist(&self, id: &PlaylistId) -> Result<Option<Playlist>>;

    /// Tracks of a playlist in playlist order
    async fn get_playlist_tracks(&self, id: &PlaylistId) -> Result<Vec<Track>>;

    /// Create a new playlist
    async fn create_playlist(&self, playlist: CreatePlaylist) -> Result<Playlist>;

    /// Append a track to the end of a playlist
    async fn add_track_to_playlist(&self, id: &PlaylistId, track_id: &TrackId) -> Result<()>;
}

/// Durable blob storage returning public URLs
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `body` under `key` and return its public URL
    async fn put_object(&self, key: &ObjectKey, content_type: &str, body: Bytes)
        -> Result<String>;
}
