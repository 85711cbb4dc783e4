//! Integration tests for the audiobooks slice


use audiobook_core::types::*;
use audiobook_core::AudiobookError;
use audiobook_storage::audiobooks;
use chrono::NaiveDate;
use test_helpers::*;

#[tokio::test]
async fn test_create_and_get_audiobook() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let created = audiobooks::create(
        pool,
        CreateAudiobook {
            name: "Dune".to_string(),
            author: Some("Frank Herbert".to_string()),
            description: Some("Desert planet".to_string()),
            created_date: NaiveDate::from_ymd_opt(1965, 8, 1).unwrap(),
            thumbnail_position: ThumbnailPosition::point(25.0, 75.0),
        },
    )
    .await
    .unwrap();

    let loaded = audiobooks::get_by_id(pool, &created.id).await.unwrap().unwrap();
    assert_eq!(loaded.name, "Dune");
    assert_eq!(loaded.author.as_deref(), Some("Frank Herbert"));
    assert_eq!(loaded.created_date, NaiveDate::from_ymd_opt(1965, 8, 1).unwrap());
    assert_eq!(loaded.thumbnail_position, ThumbnailPosition::point(25.0, 75.0));
    assert_eq!(loaded.thumbnail_url, None);
    assert_eq!(loaded.track_count, 0);
}

#[tokio::test]
async fn test_get_all_newest_first_with_track_counts() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let older = create_test_audiobook(pool, "Older").await;
    let newer = create_test_audiobook(pool, "Newer").await;
    create_test_track(pool, &older.id, "A", 1).await;
    create_test_track(pool, &older.id, "B", 2).await;

    let all = audiobooks::get_all(pool).await.unwrap();
    let summary: Vec<_> = all.iter().map(|a| (a.name.as_str(), a.track_count)).collect();
    assert_eq!(summary, vec![("Newer", 0), ("Older", 2)]);
    assert_eq!(all[0].id, newer.id);
}

#[tokio::test]
async fn test_update_keeps_thumbnail_unless_given() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let book = create_test_audiobook(pool, "Dune").await;

    let with_thumb = audiobooks::update(
        pool,
        &book.id,
        UpdateAudiobook::thumbnail_only(&book, "https://cdn.example.com/thumb.jpg"),
    )
    .await
    .unwrap();
    assert_eq!(
        with_thumb.thumbnail_url.as_deref(),
        Some("https://cdn.example.com/thumb.jpg")
    );

    let renamed = audiobooks::update(
        pool,
        &book.id,
        UpdateAudiobook {
            name: "Dune Messiah".to_string(),
            author: None,
            description: None,
            created_date: book.created_date,
            thumbnail_position: ThumbnailPosition::Anchor(ThumbnailAnchor::Top),
            thumbnail_url: None,
        },
    )
    .await
    .unwrap();

    assert_eq!(renamed.name, "Dune Messiah");
    assert_eq!(renamed.author, None);
    assert_eq!(
        renamed.thumbnail_url.as_deref(),
        Some("https://cdn.example.com/thumb.jpg")
    );
    assert_eq!(
        renamed.thumbnail_position,
        ThumbnailPosition::Anchor(ThumbnailAnchor::Top)
    );
}

#[tokio::test]
async fn test_update_missing_audiobook() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let book = create_test_audiobook(pool, "Dune").await;
    let missing = AudiobookId::new("missing");

    let result = audiobooks::update(pool, &missing, UpdateAudiobook::thumbnail_only(&book, "x")).await;
    assert!(matches!(result, Err(AudiobookError::AudiobookNotFound(_))));
}

#[tokio::test]
async fn test_delete_cascades_to_tracks() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let book = create_test_audiobook(pool, "Dune").await;
    create_test_track(pool, &book.id, "A", 1).await;
    create_test_track(pool, &book.id, "B", 2).await;

    audiobooks::delete(pool, &book.id).await.unwrap();

    assert!(audiobooks::get_by_id(pool, &book.id).await.unwrap().is_none());
    assert!(track_names(pool, &book.id).await.is_empty());
    assert!(matches!(
        audiobooks::delete(pool, &book.id).await,
        Err(AudiobookError::AudiobookNotFound(_))
    ));
}
