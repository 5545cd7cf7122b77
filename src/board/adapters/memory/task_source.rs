//! In-memory task source for tests and offline use.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::board::{
    domain::{ProjectId, TaskRecord},
    ports::{TaskSource, TaskSourceError, TaskSourceResult},
};

/// Thread-safe task source serving canned records per project.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskSource {
    projects: Arc<RwLock<HashMap<ProjectId, Vec<TaskRecord>>>>,
}

impl InMemoryTaskSource {
    /// Creates a source with no projects.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the records served for a project.
    ///
    /// # Errors
    ///
    /// Returns [`TaskSourceError::Unavailable`] if the internal lock is
    /// poisoned.
    pub fn set_project(
        &self,
        project: ProjectId,
        records: impl IntoIterator<Item = TaskRecord>,
    ) -> TaskSourceResult<()> {
        let mut projects = self.projects.write().map_err(|err| {
            TaskSourceError::unavailable(std::io::Error::other(err.to_string()))
        })?;
        projects.insert(project, records.into_iter().collect());
        Ok(())
    }
}

#[async_trait]
impl TaskSource for InMemoryTaskSource {
    async fn fetch_tasks(&self, project: ProjectId) -> TaskSourceResult<Vec<TaskRecord>> {
        let projects = self.projects.read().map_err(|err| {
            TaskSourceError::unavailable(std::io::Error::other(err.to_string()))
        })?;
        projects
            .get(&project)
            .cloned()
            .ok_or(TaskSourceError::ProjectNotFound(project))
    }
}
