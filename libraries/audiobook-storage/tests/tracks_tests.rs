//! Integration tests for the tracks slice
//!
//! Covers play order, the unique track-number index and renumbering inside
//! a transaction.


use audiobook_core::types::*;
use audiobook_core::AudiobookError;
use audiobook_storage::tracks;
use test_helpers::*;

#[tokio::test]
async fn test_tracks_come_back_in_play_order() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let book = create_test_audiobook(pool, "Dune").await;

    create_test_track(pool, &book.id, "Third", 3).await;
    create_test_track(pool, &book.id, "First", 1).await;
    create_test_track(pool, &book.id, "Second", 2).await;

    assert_eq!(track_names(pool, &book.id).await, vec!["First", "Second", "Third"]);
}

#[tokio::test]
async fn test_max_track_number() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let book = create_test_audiobook(pool, "Dune").await;

    assert_eq!(tracks::max_track_number(pool, &book.id).await.unwrap(), None);

    create_test_track(pool, &book.id, "One", 1).await;
    create_test_track(pool, &book.id, "Seven", 7).await;

    assert_eq!(tracks::max_track_number(pool, &book.id).await.unwrap(), Some(7));
}

#[tokio::test]
async fn test_duplicate_track_number_is_rejected() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let book = create_test_audiobook(pool, "Dune").await;

    let a = create_test_track(pool, &book.id, "A", 1).await;
    let b = create_test_track(pool, &book.id, "B", 2).await;

    // Writing the final number directly collides with the other track
    let result = tracks::set_track_number(pool, &a.id, 2).await;
    assert!(matches!(result, Err(AudiobookError::Database(_))));

    let loaded = tracks::get_by_id(pool, &b.id).await.unwrap().unwrap();
    assert_eq!(loaded.track_number, 2);
}

#[tokio::test]
async fn test_same_number_allowed_in_different_audiobooks() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let first = create_test_audiobook(pool, "First").await;
    let second = create_test_audiobook(pool, "Second").await;

    create_test_track(pool, &first.id, "A", 1).await;
    create_test_track(pool, &second.id, "B", 1).await;

    assert_eq!(track_names(pool, &second.id).await, vec!["B"]);
}

#[tokio::test]
async fn test_renumber_swaps_adjacent_tracks() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let book = create_test_audiobook(pool, "Dune").await;

    let a = create_test_track(pool, &book.id, "A", 1).await;
    let b = create_test_track(pool, &book.id, "B", 2).await;

    let assignments = vec![
        TrackNumberAssignment::for_position(b.id.clone(), 0, 1),
        TrackNumberAssignment::for_position(a.id.clone(), 1, 1),
    ];
    tracks::renumber(pool, &book.id, &assignments).await.unwrap();

    assert_eq!(track_names(pool, &book.id).await, vec!["B", "A"]);
}

#[tokio::test]
async fn test_renumber_closes_gaps() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let book = create_test_audiobook(pool, "Dune").await;

    let a = create_test_track(pool, &book.id, "A", 2).await;
    let b = create_test_track(pool, &book.id, "B", 5).await;
    let c = create_test_track(pool, &book.id, "C", 9).await;

    let assignments: Vec<_> = [c.id, a.id, b.id]
        .into_iter()
        .enumerate()
        .map(|(pos, id)| TrackNumberAssignment::for_position(id, pos, 2))
        .collect();
    tracks::renumber(pool, &book.id, &assignments).await.unwrap();

    let loaded = tracks::get_by_audiobook(pool, &book.id).await.unwrap();
    let numbers: Vec<_> = loaded.iter().map(|t| (t.name.as_str(), t.track_number)).collect();
    assert_eq!(numbers, vec![("C", 1), ("A", 2), ("B", 3)]);
}

#[tokio::test]
async fn test_renumber_recovers_from_leftover_placeholders() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let book = create_test_audiobook(pool, "Dune").await;

    // State left behind by an interrupted renumbering
    let a = create_test_track(pool, &book.id, "A", -1).await;
    let b = create_test_track(pool, &book.id, "B", -2).await;

    let assignments = vec![
        TrackNumberAssignment::for_position(a.id.clone(), 0, -2),
        TrackNumberAssignment::for_position(b.id.clone(), 1, -2),
    ];
    tracks::renumber(pool, &book.id, &assignments).await.unwrap();

    let loaded = tracks::get_by_audiobook(pool, &book.id).await.unwrap();
    let numbers: Vec<_> = loaded.iter().map(|t| t.track_number).collect();
    assert_eq!(numbers, vec![1, 2]);
}

#[tokio::test]
async fn test_renumber_rolls_back_on_unknown_track() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let book = create_test_audiobook(pool, "Dune").await;

    let a = create_test_track(pool, &book.id, "A", 1).await;
    let b = create_test_track(pool, &book.id, "B", 2).await;

    let assignments = vec![
        TrackNumberAssignment::for_position(b.id.clone(), 0, 1),
        TrackNumberAssignment::for_position(TrackId::new("missing"), 1, 1),
        TrackNumberAssignment::for_position(a.id.clone(), 2, 1),
    ];
    let result = tracks::renumber(pool, &book.id, &assignments).await;
    assert!(matches!(result, Err(AudiobookError::TrackNotFound(_))));

    // Nothing moved, not even the placeholders
    let loaded = tracks::get_by_audiobook(pool, &book.id).await.unwrap();
    let numbers: Vec<_> = loaded.iter().map(|t| (t.name.as_str(), t.track_number)).collect();
    assert_eq!(numbers, vec![("A", 1), ("B", 2)]);
}

#[tokio::test]
async fn test_rename_and_delete() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let book = create_test_audiobook(pool, "Dune").await;

    let a = create_test_track(pool, &book.id, "A", 1).await;
    let b = create_test_track(pool, &book.id, "B", 2).await;
    let c = create_test_track(pool, &book.id, "C", 3).await;

    tracks::rename(pool, &a.id, "Prologue").await.unwrap();
    tracks::delete(pool, &b.id).await.unwrap();

    let loaded = tracks::get_by_audiobook(pool, &book.id).await.unwrap();
    let numbers: Vec<_> = loaded.iter().map(|t| (t.name.as_str(), t.track_number)).collect();
    // Deleting leaves a gap
    assert_eq!(numbers, vec![("Prologue", 1), ("C", 3)]);
    assert_eq!(loaded[1].id, c.id);
}

#[tokio::test]
async fn test_operations_on_missing_track() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let missing = TrackId::new("missing");

    assert!(matches!(
        tracks::rename(pool, &missing, "x").await,
        Err(AudiobookError::TrackNotFound(_))
    ));
    assert!(matches!(
        tracks::delete(pool, &missing).await,
        Err(AudiobookError::TrackNotFound(_))
    ));
    assert!(matches!(
        tracks::set_track_number(pool, &missing, 4).await,
        Err(AudiobookError::TrackNotFound(_))
    ));
}

#[tokio::test]
async fn test_blank_name_rejected_by_schema() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let book = create_test_audiobook(pool, "Dune").await;
    let a = create_test_track(pool, &book.id, "A", 1).await;

    assert!(tracks::rename(pool, &a.id, "   ").await.is_err());
}
