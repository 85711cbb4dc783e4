//! Playlist types
//!
//! Playlists group tracks across audiobooks for the embeddable player.

use super::ids::PlaylistId;
use serde::{Deserialize, Serialize};

/// Playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: PlaylistId,
    pub name: String,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    pub created_at: String,
}

/// Data for creating a new playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePlaylist {
    pub name: String,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
}
