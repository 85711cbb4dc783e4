use audiobook_core::{error::Result, types::*, AudiobookError};
use chrono::NaiveDate;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::error::StorageError;

const AUDIOBOOK_SELECT: &str = r#"
    SELECT
        a.id, a.name, a.author, a.description, a.created_date,
        a.thumbnail_url, a.thumbnail_position, a.created_at,
        (SELECT COUNT(*) FROM tracks t WHERE t.audiobook_id = a.id) AS track_count
    FROM audiobooks a
"#;

fn from_row(row: &SqliteRow) -> std::result::Result<Audiobook, StorageError> {
    let created_date: String = row.get("created_date");
    let created_date = NaiveDate::parse_from_str(&created_date, "%Y-%m-%d").map_err(|e| {
        StorageError::SerializationError(format!("Invalid created_date '{created_date}': {e}"))
    })?;

    let thumbnail_position: String = row.get("thumbnail_position");
    let thumbnail_position = thumbnail_position
        .parse::<ThumbnailPosition>()
        .map_err(|e| StorageError::SerializationError(e.to_string()))?;

    Ok(Audiobook {
        id: AudiobookId::new(row.get::<String, _>("id")),
        name: row.get("name"),
        author: row.get("author"),
        description: row.get("description"),
        created_date,
        thumbnail_url: row.get("thumbnail_url"),
        thumbnail_position,
        created_at: row.get("created_at"),
        track_count: row.get::<i64, _>("track_count") as u32,
    })
}

/// Get all audiobooks, newest first
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Audiobook>> {
    let rows = sqlx::query(&format!(
        "{AUDIOBOOK_SELECT} ORDER BY a.created_at DESC, a.rowid DESC"
    ))
    .fetch_all(pool)
    .await?;

    rows.iter()
        .map(|row| from_row(row).map_err(Into::into))
        .collect()
}

/// Get audiobook by ID
pub async fn get_by_id(pool: &SqlitePool, id: &AudiobookId) -> Result<Option<Audiobook>> {
    let row = sqlx::query(&format!("{AUDIOBOOK_SELECT} WHERE a.id = ?"))
        .bind(id.as_str())
        .fetch_optional(pool)
        .await?;

    match row {
        Some(row) => Ok(Some(from_row(&row)?)),
        None => Ok(None),
    }
}

/// Create a new audiobook
pub async fn create(pool: &SqlitePool, audiobook: CreateAudiobook) -> Result<Audiobook> {
    let id = AudiobookId::generate();

    sqlx::query(
        r#"
        INSERT INTO audiobooks (id, name, author, description, created_date, thumbnail_position)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id.as_str())
    .bind(&audiobook.name)
    .bind(&audiobook.author)
    .bind(&audiobook.description)
    .bind(audiobook.created_date.format("%Y-%m-%d").to_string())
    .bind(audiobook.thumbnail_position.to_string())
    .execute(pool)
    .await?;

    get_by_id(pool, &id)
        .await?
        .ok_or_else(|| AudiobookError::store("Failed to retrieve created audiobook"))
}

/// Update an audiobook
///
/// The thumbnail URL is only overwritten when the update carries one.
pub async fn update(
    pool: &SqlitePool,
    id: &AudiobookId,
    audiobook: UpdateAudiobook,
) -> Result<Audiobook> {
    let result = sqlx::query(
        r#"
        UPDATE audiobooks
        SET name = ?,
            author = ?,
            description = ?,
            created_date = ?,
            thumbnail_position = ?,
            thumbnail_url = COALESCE(?, thumbnail_url)
        WHERE id = ?
        "#,
    )
    .bind(&audiobook.name)
    .bind(&audiobook.author)
    .bind(&audiobook.description)
    .bind(audiobook.created_date.format("%Y-%m-%d").to_string())
    .bind(audiobook.thumbnail_position.to_string())
    .bind(&audiobook.thumbnail_url)
    .bind(id.as_str())
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AudiobookError::AudiobookNotFound(id.clone()));
    }

    get_by_id(pool, id)
        .await?
        .ok_or_else(|| AudiobookError::AudiobookNotFound(id.clone()))
}

/// Delete an audiobook; its tracks go with it
pub async fn delete(pool: &SqlitePool, id: &AudiobookId) -> Result<()> {
    let result = sqlx::query("DELETE FROM audiobooks WHERE id = ?")
        .bind(id.as_str())
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AudiobookError::AudiobookNotFound(id.clone()));
    }
    Ok(())
}
