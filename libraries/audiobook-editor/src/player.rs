//! Content for the embeddable player

use audiobook_core::{
    AudiobookError, AudiobookId, AudiobookStore, PlaylistId, PlaylistStore, Result, Track,
    TrackStore,
};
use serde::{Deserialize, Serialize};

/// What the player shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerSource {
    Audiobook(AudiobookId),
    Playlist(PlaylistId),
}

/// Everything the player needs to render and play a source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerContent {
    pub title: String,
    pub author: Option<String>,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    /// In play order
    pub tracks: Vec<Track>,
}

impl PlayerContent {
    pub fn total_duration_seconds(&self) -> u64 {
        self.tracks.iter().map(|t| u64::from(t.duration_seconds)).sum()
    }
}

/// Load a source for the player
///
/// Audiobook tracks play by track number, playlist tracks in playlist order.
pub async fn load_player_content<S>(store: &S, source: &PlayerSource) -> Result<PlayerContent>
where
    S: AudiobookStore + TrackStore + PlaylistStore + ?Sized,
{
    match source {
        PlayerSource::Audiobook(id) => {
            let audiobook = store
                .get_audiobook(id)
                .await?
                .ok_or_else(|| AudiobookError::AudiobookNotFound(id.clone()))?;
            let tracks = store.get_tracks(id).await?;

            Ok(PlayerContent {
                title: audiobook.name,
                author: audiobook.author,
                description: audiobook.description,
                thumbnail_url: audiobook.thumbnail_url,
                tracks,
            })
        }
        PlayerSource::Playlist(id) => {
            let playlist = store
                .get_playlist(id)
                .await?
                .ok_or_else(|| AudiobookError::PlaylistNotFound(id.clone()))?;
            let tracks = store.get_playlist_tracks(id).await?;

            Ok(PlayerContent {
                title: playlist.name,
                author: None,
                description: playlist.description,
                thumbnail_url: playlist.thumbnail_url,
                tracks,
            })
        }
    }
}
