//! In-memory fakes with failure injection

#![allow(dead_code)]

use async_trait::async_trait;
use audiobook_core::{
    AudiobookError, AudiobookId, CreateTrack, ObjectKey, ObjectStore, Result, Track, TrackId,
    TrackNumberAssignment, TrackStore,
};
use bytes::Bytes;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

pub fn create_test_track(audiobook_id: &AudiobookId, id: &str, number: i64) -> Track {
    Track {
        id: TrackId::new(id),
        audiobook_id: audiobook_id.clone(),
        name: format!("Track {id}"),
        track_number: number,
        duration_seconds: 60,
        audio_url: format!("https://cdn.example.com/{id}.mp3"),
        file_size: 1024,
        created_at: "2024-01-01 00:00:00".to_string(),
    }
}

/// Track store that enforces unique numbers per audiobook and can be told
/// to fail
#[derive(Default)]
pub struct FakeTrackStore {
    rows: Mutex<Vec<Track>>,
    /// Every `set_track_number` call, in issue order
    pub number_calls: Mutex<Vec<(TrackId, i64)>>,
    pub get_calls: AtomicUsize,
    /// 1-based index of the `set_track_number` call that fails
    pub fail_number_call: Mutex<Option<usize>>,
    /// Fail any `set_track_number` that writes a positive number for this track
    pub fail_commit_for: Mutex<Option<TrackId>>,
    pub fail_get: AtomicBool,
    pub fail_rename: AtomicBool,
    pub fail_delete: AtomicBool,
    pub fail_max: AtomicBool,
    /// Names whose insert fails
    pub fail_create_names: Mutex<HashSet<String>>,
    pub transactional: bool,
    pub transaction_calls: AtomicUsize,
}

impl FakeTrackStore {
    pub fn with_tracks(tracks: Vec<Track>) -> Self {
        let store = Self::default();
        *store.rows.lock().unwrap() = tracks;
        store
    }

    pub fn transactional(tracks: Vec<Track>) -> Self {
        Self {
            transactional: true,
            ..Self::with_tracks(tracks)
        }
    }

    /// `(id, number)` pairs in stored number order
    pub fn stored(&self, audiobook_id: &AudiobookId) -> Vec<(String, i64)> {
        let mut rows: Vec<_> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|t| &t.audiobook_id == audiobook_id)
            .map(|t| (t.id.to_string(), t.track_number))
            .collect();
        rows.sort_by_key(|(_, n)| *n);
        rows
    }

    pub fn stored_name(&self, id: &str) -> Option<String> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id.as_str() == id)
            .map(|t| t.name.clone())
    }

    pub fn number_calls(&self) -> Vec<(TrackId, i64)> {
        self.number_calls.lock().unwrap().clone()
    }

    fn write_number(rows: &mut [Track], id: &TrackId, number: i64) -> Result<()> {
        let audiobook_id = rows
            .iter()
            .find(|t| &t.id == id)
            .map(|t| t.audiobook_id.clone())
            .ok_or_else(|| AudiobookError::TrackNotFound(id.clone()))?;

        let taken = rows
            .iter()
            .any(|t| t.audiobook_id == audiobook_id && &t.id != id && t.track_number == number);
        if taken {
            return Err(AudiobookError::Database(format!(
                "UNIQUE constraint failed: tracks.audiobook_id, tracks.track_number ({number})"
            )));
        }

        if let Some(track) = rows.iter_mut().find(|t| &t.id == id) {
            track.track_number = number;
        }
        Ok(())
    }
}

#[async_trait]
impl TrackStore for FakeTrackStore {
    async fn get_tracks(&self, audiobook_id: &AudiobookId) -> Result<Vec<Track>> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_get.load(Ordering::SeqCst) {
            return Err(AudiobookError::store("connection lost"));
        }

        let mut tracks: Vec<_> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|t| &t.audiobook_id == audiobook_id)
            .cloned()
            .collect();
        tracks.sort_by_key(|t| t.track_number);
        Ok(tracks)
    }

    async fn max_track_number(&self, audiobook_id: &AudiobookId) -> Result<Option<i64>> {
        if self.fail_max.load(Ordering::SeqCst) {
            return Err(AudiobookError::store("connection lost"));
        }
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|t| &t.audiobook_id == audiobook_id)
            .map(|t| t.track_number)
            .max())
    }

    async fn create_track(&self, track: CreateTrack) -> Result<Track> {
        if self.fail_create_names.lock().unwrap().contains(&track.name) {
            return Err(AudiobookError::store("insert rejected"));
        }

        let mut rows = self.rows.lock().unwrap();
        let taken = rows
            .iter()
            .any(|t| t.audiobook_id == track.audiobook_id && t.track_number == track.track_number);
        if taken {
            return Err(AudiobookError::Database("UNIQUE constraint failed".to_string()));
        }

        let created = Track {
            id: TrackId::new(format!("created-{}", rows.len() + 1)),
            audiobook_id: track.audiobook_id,
            name: track.name,
            track_number: track.track_number,
            duration_seconds: track.duration_seconds,
            audio_url: track.audio_url,
            file_size: track.file_size,
            created_at: "2024-01-01 00:00:00".to_string(),
        };
        rows.push(created.clone());
        Ok(created)
    }

    async fn set_track_number(&self, id: &TrackId, track_number: i64) -> Result<()> {
        let call = {
            let mut calls = self.number_calls.lock().unwrap();
            calls.push((id.clone(), track_number));
            calls.len()
        };

        if *self.fail_number_call.lock().unwrap() == Some(call) {
            return Err(AudiobookError::store(format!("injected failure on call {call}")));
        }
        if track_number > 0 && self.fail_commit_for.lock().unwrap().as_ref() == Some(id) {
            return Err(AudiobookError::store("injected commit failure"));
        }

        let mut rows = self.rows.lock().unwrap();
        Self::write_number(&mut rows, id, track_number)
    }

    async fn rename_track(&self, id: &TrackId, name: &str) -> Result<()> {
        if self.fail_rename.load(Ordering::SeqCst) {
            return Err(AudiobookError::store("rename rejected"));
        }
        let mut rows = self.rows.lock().unwrap();
        let track = rows
            .iter_mut()
            .find(|t| &t.id == id)
            .ok_or_else(|| AudiobookError::TrackNotFound(id.clone()))?;
        track.name = name.to_string();
        Ok(())
    }

    async fn delete_track(&self, id: &TrackId) -> Result<()> {
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(AudiobookError::store("delete rejected"));
        }
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|t| &t.id != id);
        if rows.len() == before {
            return Err(AudiobookError::TrackNotFound(id.clone()));
        }
        Ok(())
    }

    fn supports_transactions(&self) -> bool {
        self.transactional
    }

    async fn renumber_in_transaction(
        &self,
        _audiobook_id: &AudiobookId,
        assignments: &[TrackNumberAssignment],
    ) -> Result<()> {
        if !self.transactional {
            return Err(AudiobookError::store("no transactions"));
        }
        self.transaction_calls.fetch_add(1, Ordering::SeqCst);

        let mut rows = self.rows.lock().unwrap();
        let mut working = rows.clone();
        for a in assignments {
            Self::write_number(&mut working, &a.track_id, a.placeholder)?;
        }
        for a in assignments {
            if a.track_number > 0 && self.fail_commit_for.lock().unwrap().as_ref() == Some(&a.track_id) {
                return Err(AudiobookError::store("injected commit failure"));
            }
            Self::write_number(&mut working, &a.track_id, a.track_number)?;
        }
        *rows = working;
        Ok(())
    }
}

/// Object store that remembers keys and fails for chosen payloads
#[derive(Default)]
pub struct FakeObjectStore {
    pub keys: Mutex<Vec<String>>,
    pub content_types: Mutex<Vec<String>>,
    /// Payloads whose upload fails
    pub fail_bodies: Mutex<HashSet<Vec<u8>>>,
}

#[async_trait]
impl ObjectStore for FakeObjectStore {
    async fn put_object(&self, key: &ObjectKey, content_type: &str, body: Bytes) -> Result<String> {
        if self.fail_bodies.lock().unwrap().contains(body.as_ref()) {
            return Err(AudiobookError::upload("bucket unavailable"));
        }
        self.keys.lock().unwrap().push(key.to_string());
        self.content_types.lock().unwrap().push(content_type.to_string());
        Ok(format!("https://cdn.example.com/{key}"))
    }
}
