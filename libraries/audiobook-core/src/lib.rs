//! Audiobook Core
//!
//! Platform-agnostic domain types, store traits, and error handling for the
//! audiobook admin toolkit.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Audiobook`, `Track`, `Playlist` and their ids
//! - **Store Traits**: `TrackStore`, `AudiobookStore`, `PlaylistStore`, `ObjectStore`
//! - **Error Handling**: Unified `AudiobookError` and `Result` types
//! - **Conventions**: object key naming, embed code, the client session id
//!
//! # Example
//!
//! ```rust
//! use audiobook_core::types::{AudiobookId, ThumbnailPosition};
//! use audiobook_core::keys::ObjectKey;
//!
//! let audiobook_id = AudiobookId::new("book-1");
//! let key = ObjectKey::track_media(&audiobook_id, 4, 1_700_000_000_000);
//! assert_eq!(key.as_str(), "tracks/book-1/4-1700000000000.mp3");
//!
//! let focus: ThumbnailPosition = "25% 75%".parse().unwrap();
//! assert_eq!(focus.to_string(), "25.0% 75.0%");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod embed;
pub mod error;
pub mod format;
pub mod keys;
pub mod session;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use error::{AudiobookError, Result};
pub use keys::ObjectKey;
pub use session::{SessionContext, SessionId, SessionStore};
pub use storage::{AudiobookStore, ObjectStore, PlaylistStore, TrackStore};

pub use types::{
    Audiobook, AudiobookId, CreateAudiobook, CreatePlaylist, CreateTrack, Playlist, PlaylistId,
    ThumbnailPosition, Track, TrackId, TrackNumberAssignment, UpdateAudiobook,
};
