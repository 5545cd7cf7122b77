//! Port for persisting board-originated changes to the backend.

use crate::board::domain::{ColumnId, Task, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task mutation operations.
pub type TaskMutationResult<T> = Result<T, TaskMutationError>;

/// Write side of the backend task API.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskMutationService: Send + Sync {
    /// Persists a task's new status after a cross-column move.
    ///
    /// # Errors
    ///
    /// Returns a [`TaskMutationError`] when the backend rejects or cannot
    /// record the change.
    async fn update_status(&self, task_id: &TaskId, status: &ColumnId) -> TaskMutationResult<()>;

    /// Persists edited task fields (name, assignees, priority and so on).
    ///
    /// # Errors
    ///
    /// Returns a [`TaskMutationError`] when the backend rejects or cannot
    /// record the change.
    async fn update_task(&self, task: &Task) -> TaskMutationResult<()>;

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns a [`TaskMutationError`] when the backend rejects or cannot
    /// record the deletion.
    async fn delete_task(&self, task_id: &TaskId) -> TaskMutationResult<()>;
}

/// Errors returned by task mutation implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskMutationError {
    /// The backend has no such task.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The backend refused the change.
    #[error("change rejected: {0}")]
    Rejected(String),

    /// Transport or backend failure.
    #[error("backend error: {0}")]
    Backend(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskMutationError {
    /// Wraps a transport error.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Arc::new(err))
    }
}
