//! Port for fetching a project's tasks from the backend.

use crate::board::domain::{ProjectId, TaskRecord};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task source operations.
pub type TaskSourceResult<T> = Result<T, TaskSourceError>;

/// Read side of the backend task API.
#[async_trait]
pub trait TaskSource: Send + Sync {
    /// Fetches every task of a project, in backend order.
    ///
    /// Records are returned unvalidated; callers convert them into tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskSourceError::ProjectNotFound`] for an unknown project or
    /// [`TaskSourceError::Unavailable`] when the backend cannot be reached.
    async fn fetch_tasks(&self, project: ProjectId) -> TaskSourceResult<Vec<TaskRecord>>;
}

/// Errors returned by task source implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskSourceError {
    /// The project does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// Transport or backend failure.
    #[error("task source unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskSourceError {
    /// Wraps a transport error.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}
