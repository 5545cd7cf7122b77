//! In-memory mutation service that records what the board asked to persist.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::board::{
    domain::{ColumnId, Task, TaskId},
    ports::{TaskMutationError, TaskMutationResult, TaskMutationService},
};

/// Thread-safe recording mutation service.
///
/// Keeps the last persisted status and record per task plus the set of
/// deleted tasks. While a failure is armed with
/// [`InMemoryTaskMutationService::fail_with`], every call returns it instead.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskMutationService {
    state: Arc<RwLock<MutationState>>,
}

#[derive(Debug, Default)]
struct MutationState {
    statuses: HashMap<TaskId, ColumnId>,
    records: HashMap<TaskId, Task>,
    deleted: Vec<TaskId>,
    failure: Option<TaskMutationError>,
}

impl InMemoryTaskMutationService {
    /// Creates an empty recording service.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail with `error` until cleared.
    ///
    /// # Errors
    ///
    /// Returns [`TaskMutationError::Backend`] if the internal lock is
    /// poisoned.
    pub fn fail_with(&self, error: TaskMutationError) -> TaskMutationResult<()> {
        self.write()?.failure = Some(error);
        Ok(())
    }

    /// Clears an armed failure.
    ///
    /// # Errors
    ///
    /// Returns [`TaskMutationError::Backend`] if the internal lock is
    /// poisoned.
    pub fn clear_failure(&self) -> TaskMutationResult<()> {
        self.write()?.failure = None;
        Ok(())
    }

    /// Returns the last persisted status of a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskMutationError::Backend`] if the internal lock is
    /// poisoned.
    pub fn persisted_status(&self, task_id: &TaskId) -> TaskMutationResult<Option<ColumnId>> {
        Ok(self.read()?.statuses.get(task_id).cloned())
    }

    /// Returns the last persisted record of a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskMutationError::Backend`] if the internal lock is
    /// poisoned.
    pub fn persisted_task(&self, task_id: &TaskId) -> TaskMutationResult<Option<Task>> {
        Ok(self.read()?.records.get(task_id).cloned())
    }

    /// Returns the deleted task identifiers in deletion order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskMutationError::Backend`] if the internal lock is
    /// poisoned.
    pub fn deleted(&self) -> TaskMutationResult<Vec<TaskId>> {
        Ok(self.read()?.deleted.clone())
    }

    fn read(&self) -> TaskMutationResult<std::sync::RwLockReadGuard<'_, MutationState>> {
        self.state
            .read()
            .map_err(|err| TaskMutationError::backend(std::io::Error::other(err.to_string())))
    }

    fn write(&self) -> TaskMutationResult<std::sync::RwLockWriteGuard<'_, MutationState>> {
        self.state
            .write()
            .map_err(|err| TaskMutationError::backend(std::io::Error::other(err.to_string())))
    }

    /// Takes the write lock, surfacing an armed failure first.
    fn armed_write(&self) -> TaskMutationResult<std::sync::RwLockWriteGuard<'_, MutationState>> {
        let state = self.write()?;
        if let Some(failure) = state.failure.clone() {
            return Err(failure);
        }
        Ok(state)
    }
}

#[async_trait]
impl TaskMutationService for InMemoryTaskMutationService {
    async fn update_status(&self, task_id: &TaskId, status: &ColumnId) -> TaskMutationResult<()> {
        let mut state = self.armed_write()?;
        state.statuses.insert(task_id.clone(), status.clone());
        Ok(())
    }

    async fn update_task(&self, task: &Task) -> TaskMutationResult<()> {
        let mut state = self.armed_write()?;
        state.records.insert(task.id().clone(), task.clone());
        Ok(())
    }

    async fn delete_task(&self, task_id: &TaskId) -> TaskMutationResult<()> {
        let mut state = self.armed_write()?;
        if state.deleted.contains(task_id) {
            return Err(TaskMutationError::NotFound(task_id.clone()));
        }
        state.deleted.push(task_id.clone());
        Ok(())
    }
}
