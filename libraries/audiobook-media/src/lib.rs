//! Audiobook Media
//!
//! Everything that happens to a local file before it is uploaded:
//! type and size checks, a display name derived from the file name, and the
//! playing time read with `lofty`.
//!
//! # Example
//!
//! ```rust,no_run
//! use audiobook_media::prepare_track;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), audiobook_media::MediaError> {
//! let prepared = prepare_track(Path::new("01 - Prologue.mp3")).await?;
//! assert_eq!(prepared.display_name, "Prologue");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

mod error;
mod naming;
mod prepare;
mod probe;
mod validate;

pub use error::{MediaError, Result};
pub use naming::track_name_from_file_name;
pub use prepare::{prepare_thumbnail, prepare_track, PreparedImage, PreparedTrack};
pub use probe::probe_duration;
pub use validate::{
    content_type_for, is_track_file, validate_thumbnail, validate_track_file, MAX_THUMBNAIL_SIZE,
    MAX_TRACK_FILE_SIZE, TRACK_CONTENT_TYPE,
};
