//! Persisting a track order under a unique `(audiobook_id, track_number)` index
//!
//! Writing the final numbers directly would make two rows share a number for a
//! moment. Every track is therefore parked on a unique negative placeholder
//! first and moved to its final number afterwards.
//!
//! Stores that can run several updates atomically do both passes in one
//! transaction. Others get two concurrent phases of single-row updates; a
//! failure in either phase can leave the store partially renumbered, and the
//! caller has to reload to show what was actually stored.

use audiobook_core::{AudiobookError, AudiobookId, TrackNumberAssignment, TrackStore};
use futures_util::future::join_all;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, error};

/// Step of a renumbering that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenumberPhase {
    /// Moving tracks onto their placeholders
    Detach,
    /// Moving tracks onto their final numbers
    Commit,
    /// The single store transaction
    Transaction,
}

impl fmt::Display for RenumberPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Detach => "detach",
            Self::Commit => "commit",
            Self::Transaction => "transaction",
        };
        f.write_str(name)
    }
}

/// How to write a new order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RenumberStrategy {
    /// Transactional when the store supports it, two-phase otherwise
    #[default]
    Auto,
    TwoPhase,
    Transactional,
}

impl RenumberStrategy {
    /// Concrete strategy for `store`
    pub fn resolve(self, store: &dyn TrackStore) -> Self {
        match self {
            Self::Auto if store.supports_transactions() => Self::Transactional,
            Self::Auto => Self::TwoPhase,
            other => other,
        }
    }
}

impl fmt::Display for RenumberStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Auto => "auto",
            Self::TwoPhase => "two-phase",
            Self::Transactional => "transactional",
        };
        f.write_str(name)
    }
}

/// Result of a successful save
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveOutcome {
    /// Strategy that was actually used
    pub strategy: RenumberStrategy,
    pub tracks_renumbered: usize,
}

/// A renumbering that stopped
#[derive(Debug)]
pub struct RenumberFailure {
    pub phase: RenumberPhase,
    pub source: AudiobookError,
}

/// Write `assignments` to the store
///
/// No retries. Returns the strategy used.
pub async fn persist_order(
    store: &dyn TrackStore,
    audiobook_id: &AudiobookId,
    assignments: &[TrackNumberAssignment],
    strategy: RenumberStrategy,
) -> Result<RenumberStrategy, RenumberFailure> {
    let strategy = strategy.resolve(store);

    match strategy {
        RenumberStrategy::Transactional => {
            store
                .renumber_in_transaction(audiobook_id, assignments)
                .await
                .map_err(|source| RenumberFailure {
                    phase: RenumberPhase::Transaction,
                    source,
                })?;
        }
        _ => {
            run_phase(store, assignments, RenumberPhase::Detach).await?;
            run_phase(store, assignments, RenumberPhase::Commit).await?;
        }
    }

    Ok(strategy)
}

/// Issue one update per track, all in flight together
async fn run_phase(
    store: &dyn TrackStore,
    assignments: &[TrackNumberAssignment],
    phase: RenumberPhase,
) -> Result<(), RenumberFailure> {
    let updates = assignments.iter().map(|a| {
        let number = match phase {
            RenumberPhase::Detach => a.placeholder,
            _ => a.track_number,
        };
        store.set_track_number(&a.track_id, number)
    });

    let results = join_all(updates).await;
    let failed = results.iter().filter(|r| r.is_err()).count();
    debug!(%phase, updates = results.len(), failed, "Renumber phase finished");

    match results.into_iter().find_map(Result::err) {
        Some(source) => {
            error!(%phase, failed, error = %source, "Renumber phase failed");
            Err(RenumberFailure { phase, source })
        }
        None => Ok(()),
    }
}
