//! In-memory track order
//!
//! The position of a track in the list is its intended play order. Every
//! reorder rewrites `track_number` to `index + 1`; the store only catches up
//! once the order is saved.

use crate::error::{EditorError, Result};
use audiobook_core::{Track, TrackId, TrackNumberAssignment};
use serde::{Deserialize, Serialize};

/// Whether the in-memory order matches the last persisted order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EditState {
    /// Matches the store
    #[default]
    Clean,
    /// Reordered since the last load or save
    Dirty,
    /// A save is running
    Saving,
}

/// Ordered tracks of one audiobook plus their edit state
#[derive(Debug, Clone, Default)]
pub struct TrackList {
    tracks: Vec<Track>,
    state: EditState,
    /// Lowest track number seen in the store at the last load, clamped to 0
    lowest_stored: i64,
}

impl TrackList {
    /// List in store order, Clean
    pub fn new(tracks: Vec<Track>) -> Self {
        let mut list = Self::default();
        list.replace(tracks);
        list
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, id: &TrackId) -> Option<&Track> {
        self.tracks.iter().find(|t| &t.id == id)
    }

    pub fn position(&self, id: &TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| &t.id == id)
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    /// True only while unsaved reorders exist and no save is running
    pub fn is_dirty(&self) -> bool {
        self.state == EditState::Dirty
    }

    /// Total playing time in seconds
    pub fn total_duration_seconds(&self) -> u64 {
        self.tracks.iter().map(|t| u64::from(t.duration_seconds)).sum()
    }

    /// Move `dragged` to the index `target` occupies
    ///
    /// The dragged track is removed and reinserted at the target's index taken
    /// before the removal. Returns `false` and leaves everything untouched if
    /// both ids are equal or either one is unknown.
    pub fn reorder(&mut self, dragged: &TrackId, target: &TrackId) -> bool {
        if dragged == target {
            return false;
        }
        let (Some(from), Some(to)) = (self.position(dragged), self.position(target)) else {
            return false;
        };

        let track = self.tracks.remove(from);
        self.tracks.insert(to, track);
        self.renumber_local();

        if self.state != EditState::Saving {
            self.state = EditState::Dirty;
        }
        true
    }

    /// Set the name of one track, returning the previous name
    pub fn rename_local(&mut self, id: &TrackId, name: &str) -> Option<String> {
        let track = self.tracks.iter_mut().find(|t| &t.id == id)?;
        Some(std::mem::replace(&mut track.name, name.to_string()))
    }

    /// Remove one track; the others keep their numbers
    pub fn remove_local(&mut self, id: &TrackId) -> Option<Track> {
        let index = self.position(id)?;
        Some(self.tracks.remove(index))
    }

    /// Replace the whole sequence with the store's view
    pub fn replace(&mut self, mut tracks: Vec<Track>) {
        tracks.sort_by_key(|t| t.track_number);
        self.lowest_stored = tracks.iter().map(|t| t.track_number).min().unwrap_or(0).min(0);
        self.tracks = tracks;
        self.state = EditState::Clean;
    }

    /// Intended number for every track, in list order
    ///
    /// Placeholders lie below every number seen at the last load.
    pub fn assignments(&self) -> Vec<TrackNumberAssignment> {
        self.tracks
            .iter()
            .enumerate()
            .map(|(pos, t)| TrackNumberAssignment::for_position(t.id.clone(), pos, self.lowest_stored))
            .collect()
    }

    /// Enter `Saving`
    pub fn begin_save(&mut self) -> Result<()> {
        if self.state == EditState::Saving {
            return Err(EditorError::SaveInProgress);
        }
        self.state = EditState::Saving;
        Ok(())
    }

    /// A save failed; the list stays Dirty until the store's view is reloaded
    ///
    /// The failed attempt may have left rows on placeholders down to
    /// `lowest_stored - len`, so the floor moves below them.
    pub fn mark_save_failed(&mut self) {
        self.lowest_stored -= self.tracks.len() as i64;
        self.state = EditState::Dirty;
    }

    pub fn mark_clean(&mut self) {
        self.state = EditState::Clean;
    }

    fn renumber_local(&mut self) {
        for (index, track) in self.tracks.iter_mut().enumerate() {
            track.track_number = index as i64 + 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use audiobook_core::AudiobookId;

    fn create_test_track(id: &str, number: i64) -> Track {
        Track {
            id: TrackId::new(id),
            audiobook_id: AudiobookId::new("book"),
            name: format!("Track {id}"),
            track_number: number,
            duration_seconds: 60,
            audio_url: format!("https://cdn.example.com/{id}.mp3"),
            file_size: 1024,
            created_at: "2024-01-01 00:00:00".to_string(),
        }
    }

    fn list_of(ids: &[&str]) -> TrackList {
        TrackList::new(
            ids.iter()
                .enumerate()
                .map(|(i, id)| create_test_track(id, i as i64 + 1))
                .collect(),
        )
    }

    fn order(list: &TrackList) -> Vec<(String, i64)> {
        list.tracks()
            .iter()
            .map(|t| (t.id.to_string(), t.track_number))
            .collect()
    }

    #[test]
    fn reorder_first_onto_last() {
        let mut list = list_of(&["1", "2", "3"]);

        assert!(list.reorder(&TrackId::new("1"), &TrackId::new("3")));

        assert_eq!(
            order(&list),
            vec![("2".into(), 1), ("3".into(), 2), ("1".into(), 3)]
        );
        assert_eq!(list.state(), EditState::Dirty);
    }

    #[test]
    fn reorder_last_onto_first() {
        let mut list = list_of(&["1", "2", "3"]);

        assert!(list.reorder(&TrackId::new("3"), &TrackId::new("1")));

        assert_eq!(
            order(&list),
            vec![("3".into(), 1), ("1".into(), 2), ("2".into(), 3)]
        );
    }

    #[test]
    fn reorder_onto_itself_is_noop() {
        let mut list = list_of(&["1", "2", "3"]);

        assert!(!list.reorder(&TrackId::new("2"), &TrackId::new("2")));
        assert!(!list.reorder(&TrackId::new("2"), &TrackId::new("missing")));

        assert_eq!(
            order(&list),
            vec![("1".into(), 1), ("2".into(), 2), ("3".into(), 3)]
        );
        assert_eq!(list.state(), EditState::Clean);
    }

    #[test]
    fn reorder_closes_gaps() {
        let mut list = TrackList::new(vec![
            create_test_track("a", 2),
            create_test_track("b", 5),
            create_test_track("c", 9),
        ]);

        list.reorder(&TrackId::new("c"), &TrackId::new("b"));

        assert_eq!(
            order(&list),
            vec![("a".into(), 1), ("c".into(), 2), ("b".into(), 3)]
        );
    }

    #[test]
    fn save_state_transitions() {
        let mut list = list_of(&["1", "2"]);

        list.begin_save().unwrap();
        assert_eq!(list.state(), EditState::Saving);
        assert!(!list.is_dirty());
        assert!(matches!(list.begin_save(), Err(EditorError::SaveInProgress)));

        list.mark_save_failed();
        assert!(list.is_dirty());

        list.replace(vec![create_test_track("1", 1)]);
        assert_eq!(list.state(), EditState::Clean);
    }

    #[test]
    fn failed_save_moves_placeholders_below_the_last_attempt() {
        let mut list = list_of(&["1", "2", "3"]);
        let first: Vec<i64> = list.assignments().iter().map(|a| a.placeholder).collect();
        assert_eq!(first, vec![-1, -2, -3]);

        list.begin_save().unwrap();
        list.mark_save_failed();

        let second: Vec<i64> = list.assignments().iter().map(|a| a.placeholder).collect();
        assert_eq!(second, vec![-4, -5, -6]);

        list.replace(vec![create_test_track("1", 1), create_test_track("2", 2)]);
        assert_eq!(list.assignments()[0].placeholder, -1);
    }

    #[test]
    fn replace_sorts_by_number() {
        let list = TrackList::new(vec![create_test_track("b", 2), create_test_track("a", 1)]);
        assert_eq!(order(&list), vec![("a".into(), 1), ("b".into(), 2)]);
    }

    #[test]
    fn assignments_park_below_leftover_negatives() {
        let list = TrackList::new(vec![create_test_track("a", -2), create_test_track("b", -1)]);

        let assignments = list.assignments();

        assert_eq!(assignments[0].track_number, 1);
        assert_eq!(assignments[0].placeholder, -3);
        assert_eq!(assignments[1].track_number, 2);
        assert_eq!(assignments[1].placeholder, -4);
    }

    #[test]
    fn rename_and_remove_local() {
        let mut list = list_of(&["1", "2", "3"]);

        assert_eq!(
            list.rename_local(&TrackId::new("2"), "Interlude").as_deref(),
            Some("Track 2")
        );
        let removed = list.remove_local(&TrackId::new("1")).unwrap();

        assert_eq!(removed.id, TrackId::new("1"));
        assert_eq!(order(&list), vec![("2".into(), 2), ("3".into(), 3)]);
        assert_eq!(list.get(&TrackId::new("2")).unwrap().name, "Interlude");
        assert!(list.rename_local(&TrackId::new("1"), "x").is_none());
    }
}
