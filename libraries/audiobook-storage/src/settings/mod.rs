//! Client settings
//!
//! Key/value pairs with JSON-serialized values. The admin client keeps its
//! session id here.
//!
//! # Example
//!
//! ```rust,no_run
//! use audiobook_storage::settings;
//! # async fn example(pool: &sqlx::SqlitePool) -> Result<(), Box<dyn std::error::Error>> {
//! settings::set_setting(pool, "ui.page_size", &serde_json::json!(25)).await?;
//! let page_size = settings::get_setting(pool, "ui.page_size").await?;
//! # Ok(())
//! # }
//! ```

use sqlx::{Row, SqlitePool};

use crate::error::StorageError;

pub type Result<T> = std::result::Result<T, StorageError>;

/// Session id of this client install
pub const SETTING_SESSION_ID: &str = "session.id";

/// Get a single setting value
///
/// Returns `Ok(None)` if the key was never set.
pub async fn get_setting(pool: &SqlitePool, key: &str) -> Result<Option<serde_json::Value>> {
    let row = sqlx::query("SELECT value FROM settings WHERE key = ?")
        .bind(key)
        .fetch_optional(pool)
        .await?;

    match row {
        Some(row) => {
            let raw: String = row.get("value");
            let value: serde_json::Value = serde_json::from_str(&raw)
                .map_err(|e| StorageError::SerializationError(e.to_string()))?;
            Ok(Some(value))
        }
        None => Ok(None),
    }
}

/// Set a setting value, replacing any previous one
pub async fn set_setting(pool: &SqlitePool, key: &str, value: &serde_json::Value) -> Result<()> {
    let value_str =
        serde_json::to_string(value).map_err(|e| StorageError::SerializationError(e.to_string()))?;
    let now = chrono::Utc::now().timestamp();

    sqlx::query(
        "INSERT INTO settings (key, value, updated_at)
         VALUES (?, ?, ?)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
    )
    .bind(key)
    .bind(value_str)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(())
}

/// Delete a setting
///
/// Returns `Ok(true)` if a value was removed.
pub async fn delete_setting(pool: &SqlitePool, key: &str) -> Result<bool> {
    let result = sqlx::query("DELETE FROM settings WHERE key = ?")
        .bind(key)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
