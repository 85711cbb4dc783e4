//! Reading files from disk into upload-ready payloads

use crate::error::{MediaError, Result};
use crate::naming::track_name_from_file_name;
use crate::probe::probe_duration;
use crate::validate::{content_type_for, validate_thumbnail, validate_track_file};
use bytes::Bytes;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A validated track file with its payload
#[derive(Debug, Clone)]
pub struct PreparedTrack {
    pub file_name: String,
    /// Suggested track name, editable before upload
    pub display_name: String,
    pub content_type: String,
    pub size: u64,
    pub duration_seconds: u32,
    pub bytes: Bytes,
}

/// A validated cover image with its payload
#[derive(Debug, Clone)]
pub struct PreparedImage {
    pub file_name: String,
    /// Lowercase extension without the dot
    pub extension: String,
    pub content_type: String,
    pub bytes: Bytes,
}

/// Validate a track file, read it and probe its duration
///
/// A file whose duration cannot be read is still accepted with a duration
/// of zero.
pub async fn prepare_track(path: &Path) -> Result<PreparedTrack> {
    let file_name = file_name_of(path);
    let size = file_size(path).await?;
    let content_type = content_type_for(path);

    validate_track_file(&file_name, &content_type, size)?;

    let probe_path: PathBuf = path.to_path_buf();
    let duration_seconds = match tokio::task::spawn_blocking(move || probe_duration(&probe_path)).await {
        Ok(Ok(seconds)) => seconds,
        Ok(Err(e)) => {
            warn!(file = %file_name, error = %e, "Could not read duration");
            0
        }
        Err(e) => {
            warn!(file = %file_name, error = %e, "Duration probe did not finish");
            0
        }
    };

    let bytes = Bytes::from(tokio::fs::read(path).await?);

    let mut display_name = track_name_from_file_name(&file_name);
    if display_name.is_empty() {
        display_name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&file_name)
            .to_string();
    }

    debug!(file = %file_name, size, duration_seconds, "Prepared track");

    Ok(PreparedTrack {
        file_name,
        display_name,
        content_type,
        size,
        duration_seconds,
        bytes,
    })
}

/// Validate a cover image and read it
pub async fn prepare_thumbnail(path: &Path) -> Result<PreparedImage> {
    let file_name = file_name_of(path);
    let size = file_size(path).await?;
    let content_type = content_type_for(path);

    validate_thumbnail(&file_name, &content_type, size)?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map_or_else(|| "jpg".to_string(), str::to_lowercase);

    let bytes = Bytes::from(tokio::fs::read(path).await?);

    Ok(PreparedImage {
        file_name,
        extension,
        content_type,
        bytes,
    })
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload")
        .to_string()
}

async fn file_size(path: &Path) -> Result<u64> {
    match tokio::fs::metadata(path).await {
        Ok(meta) => Ok(meta.len()),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            Err(MediaError::FileNotFound(path.display().to_string()))
        }
        Err(e) => Err(e.into()),
    }
}
