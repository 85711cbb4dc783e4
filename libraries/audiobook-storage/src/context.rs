use crate::{audiobooks, playlists, settings, tracks};
use async_trait::async_trait;
use audiobook_core::{
    error::Result,
    storage::{AudiobookStore, PlaylistStore, TrackStore},
    types::*,
    SessionId, SessionStore,
};
use sqlx::SqlitePool;

/// Store backed by a local `SQLite` database
///
/// Implements every row-level store trait and the session store, and
/// supports transactional renumbering.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl TrackStore for SqliteStore {
    async fn get_tracks(&self, audiobook_id: &AudiobookId) -> Result<Vec<Track>> {
        tracks::get_by_audiobook(&self.pool, audiobook_id).await
    }

    async fn max_track_number(&self, audiobook_id: &AudiobookId) -> Result<Option<i64>> {
        tracks::max_track_number(&self.pool, audiobook_id).await
    }

    async fn create_track(&self, track: CreateTrack) -> Result<Track> {
        tracks::create(&self.pool, track).await
    }

    async fn set_track_number(&self, id: &TrackId, track_number: i64) -> Result<()> {
        tracks::set_track_number(&self.pool, id, track_number).await
    }

    async fn rename_track(&self, id: &TrackId, name: &str) -> Result<()> {
        tracks::rename(&self.pool, id, name).await
    }

    async fn delete_track(&self, id: &TrackId) -> Result<()> {
        tracks::delete(&self.pool, id).await
    }

    fn supports_transactions(&self) -> bool {
        true
    }

    async fn renumber_in_transaction(
        &self,
        audiobook_id: &AudiobookId,
        assignments: &[TrackNumberAssignment],
    ) -> Result<()> {
        tracks::renumber(&self.pool, audiobook_id, assignments).await
    }
}

#[async_trait]
impl AudiobookStore for SqliteStore {
    async fn get_audiobooks(&self) -> Result<Vec<Audiobook>> {
        audiobooks::get_all(&self.pool).await
    }

    async fn get_audiobook(&self, id: &AudiobookId) -> Result<Option<Audiobook>> {
        audiobooks::get_by_id(&self.pool, id).await
    }

    async fn create_audiobook(&self, audiobook: CreateAudiobook) -> Result<Audiobook> {
        audiobooks::create(&self.pool, audiobook).await
    }

    async fn update_audiobook(
        &self,
        id: &AudiobookId,
        audiobook: UpdateAudiobook,
    ) -> Result<Audiobook> {
        audiobooks::update(&self.pool, id, audiobook).await
    }

    async fn delete_audiobook(&self, id: &AudiobookId) -> Result<()> {
        audiobooks::delete(&self.pool, id).await
    }
}

#[async_trait]
impl PlaylistStore for SqliteStore {
    async fn get_playlist(&self, id: &PlaylistId) -> Result<Option<Playlist>> {
        playlists::get_by_id(&self.pool, id).await
    }

    async fn get_playlist_tracks(&self, id: &PlaylistId) -> Result<Vec<Track>> {
        playlists::get_tracks(&self.pool, id).await
    }

    async fn create_playlist(&self, playlist: CreatePlaylist) -> Result<Playlist> {
        playlists::create(&self.pool, playlist).await
    }

    async fn add_track_to_playlist(&self, id: &PlaylistId, track_id: &TrackId) -> Result<()> {
        playlists::add_track(&self.pool, id, track_id).await
    }
}

#[async_trait]
impl SessionStore for SqliteStore {
    async fn load_session_id(&self) -> Result<Option<String>> {
        let value = settings::get_setting(&self.pool, settings::SETTING_SESSION_ID).await?;
        Ok(value.and_then(|v| v.as_str().map(str::to_string)))
    }

    async fn save_session_id(&self, id: &SessionId) -> Result<()> {
        settings::set_setting(
            &self.pool,
            settings::SETTING_SESSION_ID,
            &serde_json::Value::String(id.as_str().to_string()),
        )
        .await?;
        Ok(())
    }
}
