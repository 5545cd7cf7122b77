//! Domain model for the task board.
//!
//! Pure types and the move algorithm. Nothing in here performs I/O, logs or
//! reads a clock; those concerns belong to the service layer.

mod board;
mod error;
mod ids;
mod layout;
mod record;
mod task;

pub use board::{
    BoardSnapshot, BoardState, Column, MoveOutcome, MoveResult, MovedTask, Slot,
};
pub use error::{BoardDomainError, MoveError, ParsePriorityError};
pub use ids::{ColumnId, ProjectId, TaskId, UserId};
pub use layout::{BoardLayout, ColumnSpec};
pub use record::{AssigneeRecord, PriorityRecord, RawId, TaskRecord};
pub use task::{Assignee, Priority, Task, TimeTracking};
