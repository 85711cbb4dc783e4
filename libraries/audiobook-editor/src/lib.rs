//! Audiobook Editor
//!
//! Editing workflows on top of the store traits in `audiobook-core`:
//!
//! - [`TrackList`] / [`TrackEditor`]: drag-and-drop reordering, rename and
//!   delete of the tracks of one audiobook
//! - [`ordering`]: persisting a new order without ever violating the unique
//!   track number index
//! - [`UploadSequencer`]: uploading files with consecutive track numbers
//! - [`AudiobookForm`]: creating and updating audiobooks with cover images
//! - [`load_player_content`]: data for the embeddable player
//!
//! Nothing here depends on a concrete database or object store.
//!
//! # Example
//!
//! ```rust,no_run
//! use audiobook_core::{AudiobookId, SessionContext, TrackId, TrackStore};
//! use audiobook_editor::TrackEditor;
//! use std::sync::Arc;
//!
//! # async fn example(store: Arc<dyn TrackStore>, session: SessionContext) -> audiobook_editor::Result<()> {
//! let mut editor = TrackEditor::load(store, session, AudiobookId::new("book-1")).await?;
//!
//! editor.reorder(&TrackId::new("t3"), &TrackId::new("t1"));
//! assert!(editor.is_dirty());
//!
//! editor.save_order().await?;
//! assert!(!editor.is_dirty());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod audiobook_form;
pub mod editor;
pub mod error;
pub mod ordering;
pub mod player;
pub mod track_list;
pub mod upload;

pub use audiobook_form::{AudiobookChanges, AudiobookDraft, AudiobookForm, Dashboard};
pub use editor::TrackEditor;
pub use error::{EditorError, Result};
pub use ordering::{persist_order, RenumberPhase, RenumberStrategy, SaveOutcome};
pub use player::{load_player_content, PlayerContent, PlayerSource};
pub use track_list::{EditState, TrackList};
pub use upload::{
    UploadBatch, UploadEvent, UploadItem, UploadItemId, UploadObserver, UploadSequencer,
    UploadStatus, UploadSummary,
};
