//! Sequential upload of prepared track files
//!
//! Each attempted file gets the next free track number, whether it succeeds
//! or not, so a failed upload leaves a gap instead of being renumbered.

use crate::error::{EditorError, Result};
use audiobook_core::{
    AudiobookId, CreateTrack, ObjectKey, ObjectStore, Track, TrackId, TrackStore,
};
use audiobook_media::{PreparedTrack, TRACK_CONTENT_TYPE};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

/// Identifier of an item within one batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UploadItemId(u64);

impl fmt::Display for UploadItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "upload-{}", self.0)
    }
}

/// Upload state of one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UploadStatus {
    Pending,
    Uploading,
    Complete,
    Error(String),
}

impl UploadStatus {
    /// Pending items and failed items are picked up by the next run
    pub fn is_runnable(&self) -> bool {
        matches!(self, Self::Pending | Self::Error(_))
    }
}

/// One file waiting in a batch
#[derive(Debug, Clone)]
pub struct UploadItem {
    pub id: UploadItemId,
    pub file_name: String,
    /// Track name to store, editable until uploaded
    pub name: String,
    pub duration_seconds: u32,
    pub size: u64,
    pub content_type: String,
    pub status: UploadStatus,
    /// 0 to 100
    pub progress: u8,
    /// Number of the last attempt
    pub track_number: Option<i64>,
    /// Stored track once complete
    pub track_id: Option<TrackId>,
    bytes: Bytes,
}

/// Files collected for upload to one audiobook
#[derive(Debug, Clone, Default)]
pub struct UploadBatch {
    items: Vec<UploadItem>,
    next_id: u64,
}

impl UploadBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a prepared file as a Pending item
    pub fn add(&mut self, prepared: PreparedTrack) -> UploadItemId {
        let id = UploadItemId(self.next_id);
        self.next_id += 1;

        self.items.push(UploadItem {
            id,
            file_name: prepared.file_name,
            name: prepared.display_name,
            duration_seconds: prepared.duration_seconds,
            size: prepared.size,
            content_type: prepared.content_type,
            status: UploadStatus::Pending,
            progress: 0,
            track_number: None,
            track_id: None,
            bytes: prepared.bytes,
        });
        id
    }

    pub fn remove(&mut self, id: UploadItemId) -> Option<UploadItem> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }

    /// Change the track name an item will be stored under
    pub fn rename(&mut self, id: UploadItemId, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EditorError::validation("Track name cannot be empty"));
        }
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| EditorError::validation(format!("Unknown upload item: {id}")))?;
        item.name = name.to_string();
        Ok(())
    }

    pub fn items(&self) -> &[UploadItem] {
        &self.items
    }

    pub fn get(&self, id: UploadItemId) -> Option<&UploadItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items the next run will attempt
    pub fn pending_count(&self) -> usize {
        self.items.iter().filter(|item| item.status.is_runnable()).count()
    }

    pub fn all_complete(&self) -> bool {
        !self.items.is_empty() && self.items.iter().all(|item| item.status == UploadStatus::Complete)
    }

    /// Drop completed items
    pub fn clear_completed(&mut self) {
        self.items.retain(|item| item.status != UploadStatus::Complete);
    }
}

/// Progress reported while a batch runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadEvent {
    Started { item: UploadItemId, track_number: i64 },
    Progress { item: UploadItemId, percent: u8 },
    Completed { item: UploadItemId, track_id: TrackId },
    Failed { item: UploadItemId, error: String },
}

/// Receives [`UploadEvent`]s
pub trait UploadObserver: Send + Sync {
    fn on_event(&self, event: &UploadEvent);
}

impl<F> UploadObserver for F
where
    F: Fn(&UploadEvent) + Send + Sync,
{
    fn on_event(&self, event: &UploadEvent) {
        self(event);
    }
}

/// Counts of one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadSummary {
    pub attempted: usize,
    pub completed: usize,
    pub failed: usize,
    /// Track number given to each attempt, in order
    pub assigned_numbers: Vec<i64>,
}

impl UploadSummary {
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

/// Uploads the runnable items of a batch one after another
pub struct UploadSequencer {
    tracks: Arc<dyn TrackStore>,
    objects: Arc<dyn ObjectStore>,
}

impl UploadSequencer {
    pub fn new(tracks: Arc<dyn TrackStore>, objects: Arc<dyn ObjectStore>) -> Self {
        Self { tracks, objects }
    }

    /// Upload every Pending or Error item of `batch` to `audiobook_id`
    ///
    /// Numbering starts after the highest number currently stored. If that
    /// lookup fails nothing is uploaded. A failed item is marked `Error` and
    /// the run moves on.
    pub async fn run(
        &self,
        audiobook_id: &AudiobookId,
        batch: &mut UploadBatch,
        observer: &dyn UploadObserver,
    ) -> Result<UploadSummary> {
        let max = self.tracks.max_track_number(audiobook_id).await?;
        let mut next_number = max.map_or(1, |max| max.max(0) + 1);

        let mut summary = UploadSummary::default();

        for item in batch.items.iter_mut().filter(|item| item.status.is_runnable()) {
            let track_number = next_number;
            next_number += 1;

            summary.attempted += 1;
            summary.assigned_numbers.push(track_number);

            item.status = UploadStatus::Uploading;
            item.progress = 0;
            item.track_number = Some(track_number);
            observer.on_event(&UploadEvent::Started {
                item: item.id,
                track_number,
            });

            match self.upload_one(audiobook_id, item, track_number, observer).await {
                Ok(track) => {
                    info!(
                        audiobook_id = %audiobook_id,
                        track_id = %track.id,
                        track_number,
                        file = %item.file_name,
                        "Track uploaded"
                    );
                    item.status = UploadStatus::Complete;
                    item.track_id = Some(track.id.clone());
                    summary.completed += 1;
                    observer.on_event(&UploadEvent::Completed {
                        item: item.id,
                        track_id: track.id,
                    });
                }
                Err(e) => {
                    warn!(
                        audiobook_id = %audiobook_id,
                        track_number,
                        file = %item.file_name,
                        error = %e,
                        "Track upload failed"
                    );
                    let message = e.to_string();
                    item.status = UploadStatus::Error(message.clone());
                    item.progress = 0;
                    summary.failed += 1;
                    observer.on_event(&UploadEvent::Failed {
                        item: item.id,
                        error: message,
                    });
                }
            }
        }

        info!(
            audiobook_id = %audiobook_id,
            attempted = summary.attempted,
            completed = summary.completed,
            failed = summary.failed,
            "Upload batch finished"
        );

        Ok(summary)
    }

    async fn upload_one(
        &self,
        audiobook_id: &AudiobookId,
        item: &mut UploadItem,
        track_number: i64,
        observer: &dyn UploadObserver,
    ) -> audiobook_core::Result<Track> {
        let key = ObjectKey::track_media(
            audiobook_id,
            track_number,
            chrono::Utc::now().timestamp_millis(),
        );

        observer.on_event(&UploadEvent::Progress {
            item: item.id,
            percent: 0,
        });
        let audio_url = self
            .objects
            .put_object(&key, TRACK_CONTENT_TYPE, item.bytes.clone())
            .await?;
        item.progress = 100;
        observer.on_event(&UploadEvent::Progress {
            item: item.id,
            percent: 100,
        });

        self.tracks
            .create_track(CreateTrack {
                audiobook_id: audiobook_id.clone(),
                name: item.name.clone(),
                track_number,
                duration_seconds: item.duration_seconds,
                audio_url,
                file_size: item.size,
            })
            .await
    }
}
