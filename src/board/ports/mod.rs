//! Port contracts for the task board.
//!
//! Ports define infrastructure-agnostic interfaces for the collaborators the
//! board talks to: the backend's read and write APIs and the rendering layer.

pub mod mutation;
pub mod observer;
pub mod task_source;

pub use mutation::{TaskMutationError, TaskMutationResult, TaskMutationService};
pub use observer::{BoardChange, BoardChangeKind, BoardObserver};
pub use task_source::{TaskSource, TaskSourceError, TaskSourceResult};

#[cfg(test)]
pub use mutation::MockTaskMutationService;
