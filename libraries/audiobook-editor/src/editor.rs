//! Store-backed editing session for the tracks of one audiobook

use crate::error::{EditorError, Result};
use crate::ordering::{persist_order, RenumberStrategy, SaveOutcome};
use crate::track_list::{EditState, TrackList};
use audiobook_core::{AudiobookId, SessionContext, Track, TrackId, TrackStore};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Edits the track list of one audiobook
///
/// Renames and deletes are written immediately; reorders stay local until
/// [`TrackEditor::save_order`].
pub struct TrackEditor {
    store: Arc<dyn TrackStore>,
    session: SessionContext,
    audiobook_id: AudiobookId,
    list: TrackList,
    strategy: RenumberStrategy,
}

impl TrackEditor {
    /// Load the tracks of `audiobook_id` in play order
    pub async fn load(
        store: Arc<dyn TrackStore>,
        session: SessionContext,
        audiobook_id: AudiobookId,
    ) -> Result<Self> {
        let tracks = store.get_tracks(&audiobook_id).await?;

        info!(
            session = %session.session_id(),
            audiobook_id = %audiobook_id,
            tracks = tracks.len(),
            "Loaded tracks"
        );

        Ok(Self {
            store,
            session,
            audiobook_id,
            list: TrackList::new(tracks),
            strategy: RenumberStrategy::default(),
        })
    }

    #[must_use]
    pub fn with_strategy(mut self, strategy: RenumberStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn audiobook_id(&self) -> &AudiobookId {
        &self.audiobook_id
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn tracks(&self) -> &[Track] {
        self.list.tracks()
    }

    pub fn track_list(&self) -> &TrackList {
        &self.list
    }

    pub fn state(&self) -> EditState {
        self.list.state()
    }

    pub fn is_dirty(&self) -> bool {
        self.list.is_dirty()
    }

    /// Move `dragged` onto the position of `target`, locally only
    pub fn reorder(&mut self, dragged: &TrackId, target: &TrackId) -> bool {
        self.list.reorder(dragged, target)
    }

    /// Rename a track and write the new name right away
    ///
    /// The local name is restored if the store rejects the change.
    pub async fn rename(&mut self, id: &TrackId, new_name: &str) -> Result<()> {
        let name = new_name.trim();
        if name.is_empty() {
            return Err(EditorError::validation("Track name cannot be empty"));
        }

        let previous = self
            .list
            .rename_local(id, name)
            .ok_or_else(|| EditorError::TrackNotFound(id.clone()))?;

        if let Err(e) = self.store.rename_track(id, name).await {
            warn!(track_id = %id, error = %e, "Rename failed, restoring previous name");
            self.list.rename_local(id, &previous);
            return Err(e.into());
        }

        info!(session = %self.session.session_id(), track_id = %id, "Track renamed");
        Ok(())
    }

    /// Delete a track record, then drop it from the list
    ///
    /// The remaining tracks keep their numbers. The media blob is left in
    /// object storage.
    pub async fn delete(&mut self, id: &TrackId) -> Result<Track> {
        if self.list.get(id).is_none() {
            return Err(EditorError::TrackNotFound(id.clone()));
        }

        self.store.delete_track(id).await?;

        let removed = self
            .list
            .remove_local(id)
            .ok_or_else(|| EditorError::TrackNotFound(id.clone()))?;

        info!(session = %self.session.session_id(), track_id = %id, "Track deleted");
        Ok(removed)
    }

    /// Persist the current order
    ///
    /// On success the list is Clean and reloaded from the store. On failure
    /// the list is reloaded as well so it shows what was actually stored;
    /// only if that reload fails too does the list stay Dirty.
    pub async fn save_order(&mut self) -> Result<SaveOutcome> {
        self.list.begin_save()?;

        let assignments = self.list.assignments();
        info!(
            session = %self.session.session_id(),
            audiobook_id = %self.audiobook_id,
            tracks = assignments.len(),
            strategy = %self.strategy,
            "Saving track order"
        );

        match persist_order(
            self.store.as_ref(),
            &self.audiobook_id,
            &assignments,
            self.strategy,
        )
        .await
        {
            Ok(strategy) => {
                self.list.mark_clean();
                self.reload().await?;

                info!(
                    audiobook_id = %self.audiobook_id,
                    strategy = %strategy,
                    "Track order saved"
                );
                Ok(SaveOutcome {
                    strategy,
                    tracks_renumbered: assignments.len(),
                })
            }
            Err(failure) => {
                error!(
                    audiobook_id = %self.audiobook_id,
                    phase = %failure.phase,
                    error = %failure.source,
                    "Saving track order failed, reloading"
                );
                self.list.mark_save_failed();

                let reloaded = match self.reload().await {
                    Ok(()) => true,
                    Err(e) => {
                        error!(audiobook_id = %self.audiobook_id, error = %e, "Reload after failed save failed");
                        false
                    }
                };

                Err(EditorError::OrderSave {
                    phase: failure.phase,
                    source: failure.source,
                    reloaded,
                })
            }
        }
    }

    /// Replace the list with the store's view
    pub async fn reload(&mut self) -> Result<()> {
        let tracks = self.store.get_tracks(&self.audiobook_id).await?;
        self.list.replace(tracks);
        Ok(())
    }
}
