//! Observer that keeps every notification it receives.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::warn;

use crate::board::{
    domain::{BoardSnapshot, BoardState},
    ports::{BoardChange, BoardObserver},
};

type ChangeLog = Vec<(BoardChange, BoardSnapshot)>;

/// Records changes together with the board snapshot each one produced.
///
/// The log is append-only, so a lock poisoned by a panicking reader still
/// holds every entry; it is recovered rather than discarded.
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    log: Arc<Mutex<ChangeLog>>,
}

impl RecordingObserver {
    /// Creates an observer with an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded changes, oldest first.
    #[must_use]
    pub fn changes(&self) -> Vec<BoardChange> {
        self.lock()
            .iter()
            .map(|(change, _)| change.clone())
            .collect()
    }

    /// Returns the snapshot rendered after the most recent change.
    #[must_use]
    pub fn last_snapshot(&self) -> Option<BoardSnapshot> {
        self.lock().last().map(|(_, snapshot)| snapshot.clone())
    }

    fn lock(&self) -> MutexGuard<'_, ChangeLog> {
        self.log.lock().unwrap_or_else(|poisoned| {
            warn!("recovering poisoned board change log");
            poisoned.into_inner()
        })
    }
}

impl BoardObserver for RecordingObserver {
    fn board_changed(&self, change: &BoardChange, board: &BoardState) {
        self.lock().push((change.clone(), board.snapshot()));
    }
}

#[cfg(test)]
#[path = "observer_tests.rs"]
mod tests;
