use audiobook_core::{error::Result, types::*, AudiobookError};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, Sqlite, SqlitePool, Transaction};

const TRACK_COLUMNS: &str = "id, audiobook_id, name, track_number, duration_seconds, \
                             audio_url, file_size, created_at";

pub(crate) fn from_row(row: &SqliteRow) -> Track {
    Track {
        id: TrackId::new(row.get::<String, _>("id")),
        audiobook_id: AudiobookId::new(row.get::<String, _>("audiobook_id")),
        name: row.get("name"),
        track_number: row.get("track_number"),
        duration_seconds: row.get::<i64, _>("duration_seconds") as u32,
        audio_url: row.get("audio_url"),
        file_size: row.get::<i64, _>("file_size") as u64,
        created_at: row.get("created_at"),
    }
}

/// Get all tracks of an audiobook in play order
pub async fn get_by_audiobook(pool: &SqlitePool, audiobook_id: &AudiobookId) -> Result<Vec<Track>> {
    let rows = sqlx::query(&format!(
        "SELECT {TRACK_COLUMNS} FROM tracks WHERE audiobook_id = ? ORDER BY track_number ASC"
    ))
    .bind(audiobook_id.as_str())
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(from_row).collect())
}

/// Get track by ID
pub async fn get_by_id(pool: &SqlitePool, id: &TrackId) -> Result<Option<Track>> {
    let row = sqlx::query(&format!("SELECT {TRACK_COLUMNS} FROM tracks WHERE id = ?"))
        .bind(id.as_str())
        .fetch_optional(pool)
        .await?;

    Ok(row.as_ref().map(from_row))
}

/// Highest track number of an audiobook
pub async fn max_track_number(pool: &SqlitePool, audiobook_id: &AudiobookId) -> Result<Option<i64>> {
    let row = sqlx::query("SELECT MAX(track_number) AS max_number FROM tracks WHERE audiobook_id = ?")
        .bind(audiobook_id.as_str())
        .fetch_one(pool)
        .await?;

    Ok(row.get::<Option<i64>, _>("max_number"))
}

/// Insert a track
pub async fn create(pool: &SqlitePool, track: CreateTrack) -> Result<Track> {
    let id = TrackId::generate();

    sqlx::query(
        r#"
        INSERT INTO tracks (id, audiobook_id, name, track_number, duration_seconds, audio_url, file_size)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id.as_str())
    .bind(track.audiobook_id.as_str())
    .bind(&track.name)
    .bind(track.track_number)
    .bind(i64::from(track.duration_seconds))
    .bind(&track.audio_url)
    .bind(track.file_size as i64)
    .execute(pool)
    .await?;

    get_by_id(pool, &id)
        .await?
        .ok_or_else(|| AudiobookError::store("Failed to retrieve created track"))
}

/// Set the number of one track
pub async fn set_track_number(pool: &SqlitePool, id: &TrackId, track_number: i64) -> Result<()> {
    let result = sqlx::query("UPDATE tracks SET track_number = ? WHERE id = ?")
        .bind(track_number)
        .bind(id.as_str())
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AudiobookError::TrackNotFound(id.clone()));
    }
    Ok(())
}

/// Rename one track
pub async fn rename(pool: &SqlitePool, id: &TrackId, name: &str) -> Result<()> {
    let result = sqlx::query("UPDATE tracks SET name = ? WHERE id = ?")
        .bind(name)
        .bind(id.as_str())
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AudiobookError::TrackNotFound(id.clone()));
    }
    Ok(())
}

/// Delete one track
pub async fn delete(pool: &SqlitePool, id: &TrackId) -> Result<()> {
    let result = sqlx::query("DELETE FROM tracks WHERE id = ?")
        .bind(id.as_str())
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AudiobookError::TrackNotFound(id.clone()));
    }
    Ok(())
}

/// Renumber tracks of one audiobook inside a single transaction
///
/// Every track is first parked on its negative placeholder and then moved to
/// its final number, so the unique index never sees a duplicate. Any failure
/// rolls the whole renumbering back.
pub async fn renumber(
    pool: &SqlitePool,
    audiobook_id: &AudiobookId,
    assignments: &[TrackNumberAssignment],
) -> Result<()> {
    let mut tx = pool.begin().await?;

    for assignment in assignments {
        update_number_in(&mut tx, audiobook_id, &assignment.track_id, assignment.placeholder)
            .await?;
    }
    for assignment in assignments {
        update_number_in(&mut tx, audiobook_id, &assignment.track_id, assignment.track_number)
            .await?;
    }

    tx.commit().await?;

    Ok(())
}

async fn update_number_in(
    tx: &mut Transaction<'_, Sqlite>,
    audiobook_id: &AudiobookId,
    id: &TrackId,
    track_number: i64,
) -> Result<()> {
    let result = sqlx::query("UPDATE tracks SET track_number = ? WHERE id = ? AND audiobook_id = ?")
        .bind(track_number)
        .bind(id.as_str())
        .bind(audiobook_id.as_str())
        .execute(&mut **tx)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AudiobookError::TrackNotFound(id.clone()));
    }
    Ok(())
}
