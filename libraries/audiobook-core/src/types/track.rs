//! Track types
//!
//! A track is one uploaded audio segment of an audiobook. Play order is the
//! ascending `track_number`; numbers are unique per audiobook in the store.

use super::ids::{AudiobookId, TrackId};
use serde::{Deserialize, Serialize};

/// Track of an audiobook
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: TrackId,
    pub audiobook_id: AudiobookId,
    pub name: String,
    /// Position in play order, 1-based. Negative only while a renumbering
    /// is in flight in the store.
    pub track_number: i64,
    pub duration_seconds: u32,
    pub audio_url: String,
    pub file_size: u64,
    pub created_at: String,
}

/// Data for inserting an uploaded track
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTrack {
    pub audiobook_id: AudiobookId,
    pub name: String,
    pub track_number: i64,
    pub duration_seconds: u32,
    pub audio_url: String,
    pub file_size: u64,
}

/// Target number for one track during a renumbering
///
/// `placeholder` parks the track while the renumbering is in flight. It lies
/// below every number currently stored for the audiobook, so it never collides
/// with an existing row (including rows left negative by an interrupted
/// renumbering) nor with any final number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackNumberAssignment {
    pub track_id: TrackId,
    pub track_number: i64,
    pub placeholder: i64,
}

impl TrackNumberAssignment {
    /// Assignment for the track at zero-based `position`
    ///
    /// `lowest_stored` is the smallest track number known to be stored for
    /// the audiobook.
    pub fn for_position(track_id: TrackId, position: usize, lowest_stored: i64) -> Self {
        let offset = position as i64 + 1;
        Self {
            track_id,
            track_number: offset,
            placeholder: lowest_stored.min(0) - offset,
        }
    }
}
