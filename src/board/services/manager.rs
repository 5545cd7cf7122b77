//! Board state manager: owns one board view and notifies observers.

use crate::board::{
    domain::{
        BoardDomainError, BoardLayout, BoardSnapshot, BoardState, Column, ColumnId, MoveOutcome,
        MoveResult, MovedTask, Slot, Task, TaskId,
    },
    ports::{BoardChange, BoardChangeKind, BoardObserver},
};
use mockable::Clock;
use std::sync::Arc;
use tracing::{debug, info, trace, warn};

/// Owns the board state of a single view.
///
/// Every public operation runs to completion before returning, and every
/// operation that changes the board emits exactly one [`BoardChange`] to each
/// subscribed observer. Rejected, failed and unchanged operations emit
/// nothing.
pub struct BoardStateManager<C>
where
    C: Clock + Send + Sync,
{
    layout: BoardLayout,
    board: BoardState,
    clock: Arc<C>,
    observers: Vec<Arc<dyn BoardObserver>>,
    revision: u64,
}

impl<C> BoardStateManager<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a manager holding an empty board with the layout's columns.
    #[must_use]
    pub fn new(layout: BoardLayout, clock: Arc<C>) -> Self {
        let board = BoardState::new(&layout);
        Self {
            layout,
            board,
            clock,
            observers: Vec::new(),
            revision: 0,
        }
    }

    /// Registers an observer for subsequent changes.
    pub fn subscribe(&mut self, observer: Arc<dyn BoardObserver>) {
        self.observers.push(observer);
    }

    /// Returns the layout the board was built from.
    #[must_use]
    pub const fn layout(&self) -> &BoardLayout {
        &self.layout
    }

    /// Returns the number of changes applied so far.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Replaces the whole board, discarding any unsaved local moves.
    ///
    /// # Errors
    ///
    /// Returns a [`BoardDomainError`] when the assignments name an unknown
    /// column or repeat a task; the board is unchanged in that case.
    pub fn load_tasks(
        &mut self,
        assignments: impl IntoIterator<Item = (ColumnId, Vec<Task>)>,
    ) -> Result<usize, BoardDomainError> {
        let task_count = self.board.load(assignments).inspect_err(|err| {
            warn!(error = %err, "rejected board load");
        })?;
        info!(task_count, "board loaded");
        self.notify(BoardChangeKind::Loaded { task_count });
        Ok(task_count)
    }

    /// Moves a task between positions, in the same column or across columns.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::board::domain::MoveError`] when the move is
    /// rejected; the board is unchanged in that case.
    pub fn move_task(
        &mut self,
        source: &ColumnId,
        source_index: usize,
        destination: &ColumnId,
        destination_index: usize,
    ) -> MoveResult {
        let outcome = self
            .board
            .move_task(source, source_index, destination, destination_index)
            .inspect_err(|err| {
                warn!(
                    error = %err,
                    %source,
                    source_index,
                    %destination,
                    destination_index,
                    "rejected task move"
                );
            })?;
        if let MoveOutcome::Moved(receipt) = &outcome {
            debug!(
                task_id = %receipt.task_id,
                from = %receipt.from.column,
                to = %receipt.to.column,
                index = receipt.to.index,
                "task moved"
            );
            self.notify(BoardChangeKind::Moved(receipt.clone()));
        }
        Ok(outcome)
    }

    /// Removes a task wherever it is. Absent tasks are not an error.
    pub fn remove_task(&mut self, task_id: &TaskId) -> Option<Task> {
        let Some((from, task)) = self.board.remove_task(task_id) else {
            debug!(%task_id, "task to remove is not on the board");
            return None;
        };
        debug!(%task_id, column = %from.column, "task removed");
        self.notify(BoardChangeKind::Removed {
            task_id: task_id.clone(),
            from,
        });
        Some(task)
    }

    /// Appends an externally created task to the column named by its status.
    ///
    /// # Errors
    ///
    /// Returns a [`BoardDomainError`] when the task is already on the board
    /// or its status is not a column.
    pub fn insert_task(&mut self, task: Task) -> Result<Slot, BoardDomainError> {
        let task_id = task.id().clone();
        let at = self.board.insert_task(task)?;
        debug!(%task_id, column = %at.column, "task inserted");
        self.notify(BoardChangeKind::Inserted {
            task_id,
            at: at.clone(),
        });
        Ok(at)
    }

    /// Replaces a task's fields without moving it.
    ///
    /// # Errors
    ///
    /// Returns a [`BoardDomainError`] when the task is not on the board or
    /// the update would change its column.
    pub fn update_task(&mut self, task: Task) -> Result<Slot, BoardDomainError> {
        let task_id = task.id().clone();
        let at = self.board.update_task(task)?;
        self.notify(BoardChangeKind::Updated {
            task_id,
            at: at.clone(),
        });
        Ok(at)
    }

    /// Undoes a move previously reported as [`MoveOutcome::Moved`].
    ///
    /// # Errors
    ///
    /// Returns a [`BoardDomainError`] when the task is no longer on the
    /// board.
    pub fn revert_move(&mut self, receipt: &MovedTask) -> Result<(), BoardDomainError> {
        self.board.revert_move(receipt)?;
        debug!(task_id = %receipt.task_id, column = %receipt.from.column, "task move reverted");
        self.notify(BoardChangeKind::Reverted(receipt.clone()));
        Ok(())
    }

    /// Returns one column.
    #[must_use]
    pub fn get_column(&self, column: &ColumnId) -> Option<&Column> {
        self.board.column(column)
    }

    /// Returns an owned copy of every column.
    #[must_use]
    pub fn get_all_columns(&self) -> BoardSnapshot {
        self.board.snapshot()
    }

    /// Returns the slot currently holding a task.
    #[must_use]
    pub fn locate_task(&self, task_id: &TaskId) -> Option<Slot> {
        self.board.locate(task_id)
    }

    /// Returns the number of tasks on the board.
    #[must_use]
    pub fn task_count(&self) -> usize {
        self.board.task_count()
    }

    /// Returns the underlying board state.
    #[must_use]
    pub const fn board(&self) -> &BoardState {
        &self.board
    }

    fn notify(&mut self, kind: BoardChangeKind) {
        self.revision += 1;
        let change = BoardChange {
            revision: self.revision,
            occurred_at: self.clock.utc(),
            kind,
        };
        for observer in &self.observers {
            observer.board_changed(&change, &self.board);
        }
        trace!(
            revision = self.revision,
            observers = self.observers.len(),
            "board change emitted"
        );
    }
}
