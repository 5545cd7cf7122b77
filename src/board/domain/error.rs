//! Error types for board domain validation and move rejection.

use super::{ColumnId, TaskId};
use thiserror::Error;

/// Errors returned while constructing or mutating board domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// The task identifier is empty after trimming.
    #[error("task identifier must not be empty")]
    EmptyTaskId,

    /// The column identifier is empty after trimming.
    #[error("column identifier must not be empty")]
    EmptyColumnId,

    /// The task name is empty after trimming.
    #[error("task name must not be empty")]
    EmptyTaskName,

    /// A task record did not carry a status identifier.
    #[error("task {0} has no status")]
    MissingStatus(TaskId),

    /// A time-tracking field held a negative number.
    #[error("task {task_id} has negative {field}: {value}")]
    NegativeTimeTracking {
        /// Task carrying the invalid value.
        task_id: TaskId,
        /// Name of the offending field.
        field: &'static str,
        /// Offending value.
        value: i64,
    },

    /// A layout declared no columns.
    #[error("board layout must declare at least one column")]
    EmptyLayout,

    /// A layout declared the same column twice.
    #[error("duplicate column in layout: {0}")]
    DuplicateColumn(ColumnId),

    /// The column is not part of the board layout.
    #[error("unknown column: {0}")]
    UnknownColumn(ColumnId),

    /// The same task identifier was supplied more than once.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task is not on the board.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// An in-place update attempted to change the task's column.
    #[error("task {task_id} is in column {current}, status changes require a move to {requested}")]
    StatusChangeRequiresMove {
        /// Task being updated.
        task_id: TaskId,
        /// Column currently holding the task.
        current: ColumnId,
        /// Status carried by the update.
        requested: ColumnId,
    },

    /// A task record carried an unrecognized priority.
    #[error(transparent)]
    InvalidPriority(#[from] ParsePriorityError),

    /// Task record JSON could not be parsed.
    #[error("invalid task record: {0}")]
    InvalidRecord(String),

    /// The layout JSON could not be parsed.
    #[error("invalid board layout: {0}")]
    InvalidLayout(String),
}

/// Reasons a move request leaves the board untouched.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MoveError {
    /// The source coordinate does not resolve to a task.
    #[error("no task at index {index} of column {column}")]
    InvalidSource {
        /// Requested source column.
        column: ColumnId,
        /// Requested source index.
        index: usize,
    },

    /// The destination column is not part of the board layout.
    #[error("unknown destination column: {0}")]
    UnknownDestinationColumn(ColumnId),

    /// The destination column is full.
    #[error("column {column} is full (capacity {capacity})")]
    RejectedCapacity {
        /// Destination column that rejected the task.
        column: ColumnId,
        /// Declared capacity of that column.
        capacity: usize,
    },
}

/// Error returned while parsing priority labels.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown priority: {0}")]
pub struct ParsePriorityError(pub String);
