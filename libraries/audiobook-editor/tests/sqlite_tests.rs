//! End-to-end editing against a real SQLite file
//!
//! The unique `(audiobook_id, track_number)` index must never trip, whichever
//! renumbering strategy is used.

use audiobook_core::{
    AudiobookId, AudiobookStore, CreateAudiobook, CreateTrack, ObjectStore, SessionContext,
    ThumbnailPosition, TrackId, TrackStore,
};
use audiobook_editor::{
    load_player_content, AudiobookChanges, AudiobookDraft, AudiobookForm, Dashboard, PlayerSource, RenumberStrategy,
    TrackEditor,
};
use audiobook_objects::LocalObjectStore;
use audiobook_storage::SqliteStore;
use chrono::NaiveDate;
use std::sync::Arc;
use tempfile::TempDir;

struct TestDb {
    store: Arc<SqliteStore>,
    _temp_dir: TempDir,
}

impl TestDb {
    async fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_url = format!("sqlite://{}", temp_dir.path().join("test.db").display());

        let pool = audiobook_storage::create_pool(&db_url)
            .await
            .expect("Failed to create pool");
        audiobook_storage::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        Self {
            store: Arc::new(SqliteStore::new(pool)),
            _temp_dir: temp_dir,
        }
    }

    async fn audiobook_with_tracks(&self, names: &[&str]) -> (AudiobookId, Vec<TrackId>) {
        let book = self
            .store
            .create_audiobook(CreateAudiobook {
                name: "Dune".to_string(),
                author: None,
                description: None,
                created_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                thumbnail_position: ThumbnailPosition::default(),
            })
            .await
            .unwrap();

        let mut ids = Vec::new();
        for (i, name) in names.iter().enumerate() {
            let track = self
                .store
                .create_track(CreateTrack {
                    audiobook_id: book.id.clone(),
                    name: (*name).to_string(),
                    track_number: i as i64 + 1,
                    duration_seconds: 60,
                    audio_url: format!("https://cdn.example.com/{name}.mp3"),
                    file_size: 100,
                })
                .await
                .unwrap();
            ids.push(track.id);
        }
        (book.id, ids)
    }

    async fn editor(&self, audiobook_id: &AudiobookId, strategy: RenumberStrategy) -> TrackEditor {
        let session = SessionContext::get_or_create(self.store.as_ref()).await.unwrap();
        let tracks: Arc<dyn TrackStore> = self.store.clone();
        TrackEditor::load(tracks, session, audiobook_id.clone())
            .await
            .unwrap()
            .with_strategy(strategy)
    }

    async fn stored_names(&self, audiobook_id: &AudiobookId) -> Vec<(String, i64)> {
        self.store
            .get_tracks(audiobook_id)
            .await
            .unwrap()
            .into_iter()
            .map(|t| (t.name, t.track_number))
            .collect()
    }
}

async fn swap_adjacent(strategy: RenumberStrategy) {
    let db = TestDb::new().await;
    let (book, ids) = db.audiobook_with_tracks(&["A", "B", "C"]).await;
    let mut editor = db.editor(&book, strategy).await;

    assert!(editor.reorder(&ids[1], &ids[0]));
    let outcome = editor.save_order().await.unwrap();

    let expected = RenumberStrategy::resolve(strategy, db.store.as_ref());
    assert_eq!(outcome.strategy, expected);
    assert_eq!(
        db.stored_names(&book).await,
        vec![("B".to_string(), 1), ("A".to_string(), 2), ("C".to_string(), 3)]
    );
    assert!(!editor.is_dirty());
}

#[tokio::test]
async fn test_swap_adjacent_two_phase() {
    swap_adjacent(RenumberStrategy::TwoPhase).await;
}

#[tokio::test]
async fn test_swap_adjacent_transactional() {
    swap_adjacent(RenumberStrategy::Transactional).await;
}

#[tokio::test]
async fn test_swap_adjacent_auto() {
    swap_adjacent(RenumberStrategy::Auto).await;
}

#[tokio::test]
async fn test_rename_delete_and_save() {
    let db = TestDb::new().await;
    let (book, ids) = db.audiobook_with_tracks(&["A", "B", "C", "D"]).await;
    let mut editor = db.editor(&book, RenumberStrategy::Auto).await;

    editor.rename(&ids[0], " Prologue ").await.unwrap();
    editor.delete(&ids[2]).await.unwrap();
    assert_eq!(
        db.stored_names(&book).await,
        vec![
            ("Prologue".to_string(), 1),
            ("B".to_string(), 2),
            ("D".to_string(), 4)
        ]
    );

    editor.reorder(&ids[3], &ids[0]);
    editor.save_order().await.unwrap();

    assert_eq!(
        db.stored_names(&book).await,
        vec![
            ("D".to_string(), 1),
            ("Prologue".to_string(), 2),
            ("B".to_string(), 3)
        ]
    );
}

#[tokio::test]
async fn test_form_dashboard_and_player() {
    let db = TestDb::new().await;
    let objects_dir = tempfile::tempdir().unwrap();
    let objects: Arc<dyn ObjectStore> = Arc::new(LocalObjectStore::new(
        objects_dir.path(),
        "https://cdn.example.com",
    ));
    let audiobooks: Arc<dyn AudiobookStore> = db.store.clone();
    let form = AudiobookForm::new(audiobooks, objects);

    let mut draft = AudiobookDraft::named("Dune");
    draft.author = Some("Frank Herbert".to_string());
    let thumbnail = audiobook_media::PreparedImage {
        file_name: "cover.png".to_string(),
        extension: "png".to_string(),
        content_type: "image/png".to_string(),
        bytes: bytes::Bytes::from_static(b"\x89PNG"),
    };

    let created = form.create(draft, Some(thumbnail)).await.unwrap();
    let url = created.thumbnail_url.clone().unwrap();
    assert!(url.starts_with(&format!("https://cdn.example.com/audiobook-thumbnails/{}-", created.id)));
    assert!(url.ends_with(".png"));

    db.store
        .create_track(CreateTrack {
            audiobook_id: created.id.clone(),
            name: "Opening".to_string(),
            track_number: 1,
            duration_seconds: 125,
            audio_url: "https://cdn.example.com/tracks/opening.mp3".to_string(),
            file_size: 10,
        })
        .await
        .unwrap();

    let dashboard = Dashboard::load(db.store.as_ref()).await.unwrap();
    assert_eq!(dashboard.audiobooks.len(), 1);
    assert_eq!(dashboard.total_tracks(), 1);

    let content = load_player_content(db.store.as_ref(), &PlayerSource::Audiobook(created.id.clone()))
        .await
        .unwrap();
    assert_eq!(content.title, "Dune");
    assert_eq!(content.author.as_deref(), Some("Frank Herbert"));
    assert_eq!(content.total_duration_seconds(), 125);

    let missing = load_player_content(
        db.store.as_ref(),
        &PlayerSource::Audiobook(AudiobookId::new("missing")),
    )
    .await;
    assert!(missing.is_err());
}

#[tokio::test]
async fn test_edit_name_only_keeps_other_fields() {
    let db = TestDb::new().await;
    let objects_dir = tempfile::tempdir().unwrap();
    let objects: Arc<dyn ObjectStore> = Arc::new(LocalObjectStore::new(
        objects_dir.path(),
        "https://cdn.example.com",
    ));
    let form = AudiobookForm::new(db.store.clone(), objects);

    let mut draft = AudiobookDraft::named("Dune");
    draft.author = Some("Frank Herbert".to_string());
    draft.description = Some("Desert planet".to_string());
    draft.created_date = NaiveDate::from_ymd_opt(1965, 8, 1).unwrap();
    draft.thumbnail_position = "top left".parse::<ThumbnailPosition>().unwrap();
    let created = form.create(draft, None).await.unwrap();

    let changes = AudiobookChanges {
        name: Some("Dune II".to_string()),
        ..AudiobookChanges::default()
    };
    let edited = form.edit(&created.id, changes, None).await.unwrap();

    assert_eq!(edited.name, "Dune II");
    assert_eq!(edited.author.as_deref(), Some("Frank Herbert"));
    assert_eq!(edited.description.as_deref(), Some("Desert planet"));
    assert_eq!(edited.created_date, created.created_date);
    assert_eq!(edited.thumbnail_position, created.thumbnail_position);

    let stored = db.store.get_audiobook(&created.id).await.unwrap().unwrap();
    assert_eq!(stored.author.as_deref(), Some("Frank Herbert"));

    let missing = form
        .edit(&AudiobookId::new("missing"), AudiobookChanges::default(), None)
        .await;
    assert!(missing.is_err());
}
