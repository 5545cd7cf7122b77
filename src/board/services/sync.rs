//! Calling-layer orchestration between the board and the backend ports.

use super::BoardStateManager;
use crate::board::{
    domain::{
        BoardDomainError, ColumnId, MoveError, MoveOutcome, MovedTask, ProjectId, Slot, Task,
        TaskId,
    },
    ports::{TaskMutationError, TaskMutationService, TaskSource, TaskSourceError},
};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// What to do with a local move when persisting it fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersistFailurePolicy {
    /// Keep the local move; board and backend disagree until the next
    /// refresh.
    #[default]
    KeepLocal,
    /// Undo the local move so the board matches the backend again.
    RollBack,
}

/// A drag-and-drop gesture resolved to board coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRequest {
    /// Where the dragged task currently is.
    pub source: Slot,
    /// Where the task was dropped.
    pub destination: Slot,
}

impl MoveRequest {
    /// Creates a move request from raw coordinates.
    #[must_use]
    pub const fn new(
        source_column: ColumnId,
        source_index: usize,
        destination_column: ColumnId,
        destination_index: usize,
    ) -> Self {
        Self {
            source: Slot::new(source_column, source_index),
            destination: Slot::new(destination_column, destination_index),
        }
    }
}

/// Service-level errors for board synchronization.
#[derive(Debug, Error)]
pub enum BoardSyncError {
    /// Board or record validation failed.
    #[error(transparent)]
    Domain(#[from] BoardDomainError),

    /// The board rejected a move.
    #[error(transparent)]
    Move(#[from] MoveError),

    /// Fetching tasks failed.
    #[error(transparent)]
    Source(#[from] TaskSourceError),

    /// A local move was applied but could not be persisted.
    #[error("failed to persist move of task {}: {}", .receipt.task_id, .source)]
    MoveNotPersisted {
        /// The move that was applied locally.
        receipt: MovedTask,
        /// Whether the local move has been undone.
        rolled_back: bool,
        /// Backend failure.
        #[source]
        source: TaskMutationError,
    },

    /// A change was refused by the backend; the board was not touched.
    #[error("failed to persist change to task {task_id}: {source}")]
    ChangeNotPersisted {
        /// Task the change was for.
        task_id: TaskId,
        /// Backend failure.
        #[source]
        source: TaskMutationError,
    },
}

/// Result type for board synchronization operations.
pub type BoardSyncResult<T> = Result<T, BoardSyncError>;

/// Couples a [`BoardStateManager`] with the backend's read and write ports.
pub struct BoardSyncService<S, M, C>
where
    S: TaskSource,
    M: TaskMutationService,
    C: Clock + Send + Sync,
{
    source: Arc<S>,
    mutations: Arc<M>,
    manager: BoardStateManager<C>,
    policy: PersistFailurePolicy,
}

impl<S, M, C> BoardSyncService<S, M, C>
where
    S: TaskSource,
    M: TaskMutationService,
    C: Clock + Send + Sync,
{
    /// Creates a sync service with the default [`PersistFailurePolicy`].
    #[must_use]
    pub fn new(source: Arc<S>, mutations: Arc<M>, manager: BoardStateManager<C>) -> Self {
        Self {
            source,
            mutations,
            manager,
            policy: PersistFailurePolicy::default(),
        }
    }

    /// Sets the policy applied when persisting a move fails.
    #[must_use]
    pub const fn with_policy(mut self, policy: PersistFailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the active persist-failure policy.
    #[must_use]
    pub const fn policy(&self) -> PersistFailurePolicy {
        self.policy
    }

    /// Returns the managed board.
    #[must_use]
    pub const fn manager(&self) -> &BoardStateManager<C> {
        &self.manager
    }

    /// Returns the managed board mutably, e.g. to subscribe observers.
    pub fn manager_mut(&mut self) -> &mut BoardStateManager<C> {
        &mut self.manager
    }

    /// Fetches a project's tasks and installs them, replacing the board.
    ///
    /// Tasks keep the backend order within each column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardSyncError`] when fetching, record validation or loading
    /// fails. The board is unchanged in every error case.
    pub async fn refresh(&mut self, project: ProjectId) -> BoardSyncResult<usize> {
        let records = self.source.fetch_tasks(project).await?;
        let tasks = records
            .into_iter()
            .map(Task::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let mut assignments: Vec<(ColumnId, Vec<Task>)> = Vec::new();
        for task in tasks {
            match assignments
                .iter_mut()
                .find(|(column, _)| column == task.status())
            {
                Some((_, bucket)) => bucket.push(task),
                None => assignments.push((task.status().clone(), vec![task])),
            }
        }

        let task_count = self.manager.load_tasks(assignments)?;
        info!(%project, task_count, "board refreshed from task source");
        Ok(task_count)
    }

    /// Applies a move locally, then persists the new status when the task
    /// changed columns.
    ///
    /// # Errors
    ///
    /// Returns [`BoardSyncError::Move`] when the board rejects the move, or
    /// [`BoardSyncError::MoveNotPersisted`] when the backend refuses it; in
    /// the latter case the board follows the configured policy.
    pub async fn move_task(&mut self, request: &MoveRequest) -> BoardSyncResult<MoveOutcome> {
        let outcome = self.manager.move_task(
            &request.source.column,
            request.source.index,
            &request.destination.column,
            request.destination.index,
        )?;
        let receipt = match &outcome {
            MoveOutcome::Moved(receipt) if receipt.changed_column() => receipt.clone(),
            _ => return Ok(outcome),
        };

        let Err(source) = self
            .mutations
            .update_status(&receipt.task_id, &receipt.to.column)
            .await
        else {
            return Ok(outcome);
        };

        let rolled_back = match self.policy {
            PersistFailurePolicy::KeepLocal => false,
            PersistFailurePolicy::RollBack => {
                self.manager.revert_move(&receipt)?;
                true
            }
        };
        warn!(
            task_id = %receipt.task_id,
            error = %source,
            rolled_back,
            "failed to persist task move"
        );
        Err(BoardSyncError::MoveNotPersisted {
            receipt,
            rolled_back,
            source,
        })
    }

    /// Persists edited task fields, then applies them to the board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardSyncError::Domain`] when the board cannot take the
    /// update (checked before contacting the backend) or
    /// [`BoardSyncError::ChangeNotPersisted`] when the backend refuses it.
    pub async fn update_task(&mut self, task: Task) -> BoardSyncResult<Slot> {
        let slot = self
            .manager
            .locate_task(task.id())
            .ok_or_else(|| BoardDomainError::TaskNotFound(task.id().clone()))?;
        if &slot.column != task.status() {
            return Err(BoardDomainError::StatusChangeRequiresMove {
                task_id: task.id().clone(),
                current: slot.column,
                requested: task.status().clone(),
            }
            .into());
        }

        self.mutations
            .update_task(&task)
            .await
            .map_err(|source| not_persisted(task.id(), source))?;
        Ok(self.manager.update_task(task)?)
    }

    /// Deletes a task upstream, then removes it from the board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardSyncError::ChangeNotPersisted`] when the backend
    /// refuses the deletion; the board keeps the task in that case.
    pub async fn delete_task(&mut self, task_id: &TaskId) -> BoardSyncResult<Option<Task>> {
        self.mutations
            .delete_task(task_id)
            .await
            .map_err(|source| not_persisted(task_id, source))?;
        Ok(self.manager.remove_task(task_id))
    }
}

fn not_persisted(task_id: &TaskId, source: TaskMutationError) -> BoardSyncError {
    warn!(%task_id, error = %source, "failed to persist task change");
    BoardSyncError::ChangeNotPersisted {
        task_id: task_id.clone(),
        source,
    }
}
