//! Port through which the presentation layer learns about board changes.

use crate::board::domain::{BoardState, MovedTask, Slot, TaskId};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// What a mutation did to the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BoardChangeKind {
    /// The board was replaced wholesale.
    Loaded {
        /// Number of tasks now on the board.
        task_count: usize,
    },
    /// A task moved.
    Moved(MovedTask),
    /// A previously applied move was undone.
    Reverted(MovedTask),
    /// A task left the board.
    Removed {
        /// Removed task.
        task_id: TaskId,
        /// Slot the task occupied.
        from: Slot,
    },
    /// A task joined the board.
    Inserted {
        /// Inserted task.
        task_id: TaskId,
        /// Slot the task now occupies.
        at: Slot,
    },
    /// A task's fields changed in place.
    Updated {
        /// Updated task.
        task_id: TaskId,
        /// Slot the task occupies.
        at: Slot,
    },
}

/// Notification emitted after every state-changing operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardChange {
    /// Board revision after the change; increases by one per change.
    pub revision: u64,
    /// When the change was applied.
    pub occurred_at: DateTime<Utc>,
    /// What changed.
    pub kind: BoardChangeKind,
}

/// Consumer of board change notifications.
///
/// Observers run synchronously inside the mutating call, after the change
/// has been applied, and see the new board state.
pub trait BoardObserver: Send + Sync {
    /// Called once per applied change.
    fn board_changed(&self, change: &BoardChange, board: &BoardState);
}
