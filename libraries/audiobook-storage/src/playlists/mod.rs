use audiobook_core::{error::Result, types::*, AudiobookError};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::tracks;

fn from_row(row: &SqliteRow) -> Playlist {
    Playlist {
        id: PlaylistId::new(row.get::<String, _>("id")),
        name: row.get("name"),
        description: row.get("description"),
        thumbnail_url: row.get("thumbnail_url"),
        created_at: row.get("created_at"),
    }
}

/// Get playlist by ID
pub async fn get_by_id(pool: &SqlitePool, id: &PlaylistId) -> Result<Option<Playlist>> {
    let row = sqlx::query(
        "SELECT id, name, description, thumbnail_url, created_at FROM playlists WHERE id = ?",
    )
    .bind(id.as_str())
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(from_row))
}

/// Get the tracks of a playlist in playlist order
pub async fn get_tracks(pool: &SqlitePool, id: &PlaylistId) -> Result<Vec<Track>> {
    let rows = sqlx::query(
        r#"
        SELECT t.id, t.audiobook_id, t.name, t.track_number, t.duration_seconds,
               t.audio_url, t.file_size, t.created_at
        FROM playlist_tracks pt
        INNER JOIN tracks t ON t.id = pt.track_id
        WHERE pt.playlist_id = ?
        ORDER BY pt.track_order ASC
        "#,
    )
    .bind(id.as_str())
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(tracks::from_row).collect())
}

/// Create a new playlist
pub async fn create(pool: &SqlitePool, playlist: CreatePlaylist) -> Result<Playlist> {
    let id = PlaylistId::generate();

    sqlx::query("INSERT INTO playlists (id, name, description, thumbnail_url) VALUES (?, ?, ?, ?)")
        .bind(id.as_str())
        .bind(&playlist.name)
        .bind(&playlist.description)
        .bind(&playlist.thumbnail_url)
        .execute(pool)
        .await?;

    get_by_id(pool, &id)
        .await?
        .ok_or_else(|| AudiobookError::store("Failed to retrieve created playlist"))
}

/// Append a track to the end of a playlist
pub async fn add_track(pool: &SqlitePool, id: &PlaylistId, track_id: &TrackId) -> Result<()> {
    if get_by_id(pool, id).await?.is_none() {
        return Err(AudiobookError::PlaylistNotFound(id.clone()));
    }

    // Next order is one past the current maximum
    let row = sqlx::query(
        "SELECT COALESCE(MAX(track_order), 0) + 1 AS next_order FROM playlist_tracks WHERE playlist_id = ?",
    )
    .bind(id.as_str())
    .fetch_one(pool)
    .await?;
    let next_order: i64 = row.get("next_order");

    sqlx::query("INSERT INTO playlist_tracks (playlist_id, track_id, track_order) VALUES (?, ?, ?)")
        .bind(id.as_str())
        .bind(track_id.as_str())
        .bind(next_order)
        .execute(pool)
        .await?;

    Ok(())
}
