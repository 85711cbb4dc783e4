//! Upload checks
//!
//! Tracks must be MP3 and at most 150 MiB; cover images must have an
//! `image/*` type and be at most 5 MiB.

use crate::error::{MediaError, Result};
use audiobook_core::format::format_file_size;
use std::path::Path;

/// Largest accepted track file
pub const MAX_TRACK_FILE_SIZE: u64 = 150 * 1024 * 1024;

/// Largest accepted cover image
pub const MAX_THUMBNAIL_SIZE: u64 = 5 * 1024 * 1024;

/// Content type stored for every track
pub const TRACK_CONTENT_TYPE: &str = "audio/mpeg";

/// Guess the content type of a file from its name
pub fn content_type_for(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

/// Whether a file may be uploaded as a track
///
/// Either the content type says `audio/mpeg` or the name ends in `.mp3`.
pub fn is_track_file(file_name: &str, content_type: &str) -> bool {
    content_type.contains(TRACK_CONTENT_TYPE) || file_name.to_lowercase().ends_with(".mp3")
}

/// Check type and size of a track file
pub fn validate_track_file(file_name: &str, content_type: &str, size: u64) -> Result<()> {
    if !is_track_file(file_name, content_type) {
        return Err(MediaError::UnsupportedFormat(file_name.to_string()));
    }
    check_size(file_name, size, MAX_TRACK_FILE_SIZE)
}

/// Check type and size of a cover image
pub fn validate_thumbnail(file_name: &str, content_type: &str, size: u64) -> Result<()> {
    if !content_type.starts_with("image/") {
        return Err(MediaError::NotAnImage(file_name.to_string()));
    }
    check_size(file_name, size, MAX_THUMBNAIL_SIZE)
}

fn check_size(file_name: &str, size: u64, limit: u64) -> Result<()> {
    if size > limit {
        return Err(MediaError::TooLarge {
            file: file_name.to_string(),
            size: format_file_size(size),
            limit: format_file_size(limit),
        });
    }
    Ok(())
}
