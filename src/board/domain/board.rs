//! Board state: ordered columns of tasks and the move algorithm.
//!
//! Every mutating method validates its inputs before touching any column, so
//! a rejected operation leaves the board exactly as it was.

use super::{BoardDomainError, BoardLayout, ColumnId, ColumnSpec, MoveError, Task, TaskId};
use serde::Serialize;
use std::collections::HashSet;

/// A `(column, index)` coordinate on the board.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Slot {
    /// Column holding the position.
    pub column: ColumnId,
    /// Zero-based index inside the column.
    pub index: usize,
}

impl Slot {
    /// Creates a slot.
    #[must_use]
    pub const fn new(column: ColumnId, index: usize) -> Self {
        Self { column, index }
    }
}

/// Receipt for an applied move, sufficient to revert it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovedTask {
    /// Task that moved.
    pub task_id: TaskId,
    /// Where the task was before the move.
    pub from: Slot,
    /// Where the task ended up, after index clamping.
    pub to: Slot,
}

impl MovedTask {
    /// Returns `true` when the task changed columns.
    #[must_use]
    pub fn changed_column(&self) -> bool {
        self.from.column != self.to.column
    }
}

/// Successful outcome of a move request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum MoveOutcome {
    /// The task was relocated.
    Moved(MovedTask),
    /// The request resolved to the task's current position; nothing changed.
    Unchanged,
}

/// Result of a move request.
pub type MoveResult = Result<MoveOutcome, MoveError>;

/// A column and its ordered tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    spec: ColumnSpec,
    tasks: Vec<Task>,
}

impl Column {
    fn empty(spec: ColumnSpec) -> Self {
        Self {
            spec,
            tasks: Vec::new(),
        }
    }

    /// Returns the column identifier.
    #[must_use]
    pub const fn id(&self) -> &ColumnId {
        &self.spec.id
    }

    /// Returns the display title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.spec.title
    }

    /// Returns the declared capacity, if any.
    #[must_use]
    pub const fn capacity(&self) -> Option<usize> {
        self.spec.capacity
    }

    /// Returns the tasks in board order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the number of tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` when the column holds no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Returns `true` when the column cannot accept another task by move.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.capacity().is_some_and(|capacity| self.len() >= capacity)
    }

    fn position_of(&self, task_id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id() == task_id)
    }

    /// Same-column reorder. `from` must be a valid index.
    fn reorder(&mut self, from: usize, to: usize) -> MoveOutcome {
        let last = self.tasks.len().saturating_sub(1);
        let target = to.min(last);
        if target == from {
            return MoveOutcome::Unchanged;
        }
        let task = self.tasks.remove(from);
        let task_id = task.id().clone();
        self.tasks.insert(target, task);
        MoveOutcome::Moved(MovedTask {
            task_id,
            from: Slot::new(self.id().clone(), from),
            to: Slot::new(self.id().clone(), target),
        })
    }
}

/// Owned copy of the board for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardSnapshot {
    /// Columns in display order.
    pub columns: Vec<Column>,
}

impl BoardSnapshot {
    /// Looks up a column by identifier.
    #[must_use]
    pub fn column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|column| column.id() == id)
    }
}

/// The complete set of columns and their ordered contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    columns: Vec<Column>,
}

impl BoardState {
    /// Creates an empty board with the layout's columns.
    #[must_use]
    pub fn new(layout: &BoardLayout) -> Self {
        Self {
            columns: layout.columns().iter().cloned().map(Column::empty).collect(),
        }
    }

    /// Replaces the contents of every column.
    ///
    /// Columns missing from `assignments` end up empty. A task whose status
    /// disagrees with the column it is loaded into takes that column as its
    /// status. Capacity is not enforced. Returns the number of tasks loaded.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::UnknownColumn`] for a column outside the
    /// layout or [`BoardDomainError::DuplicateTask`] when a task identifier
    /// appears more than once. The board is unchanged on error.
    pub fn load(
        &mut self,
        assignments: impl IntoIterator<Item = (ColumnId, Vec<Task>)>,
    ) -> Result<usize, BoardDomainError> {
        let mut staged: Vec<Vec<Task>> = self.columns.iter().map(|_| Vec::new()).collect();
        let mut seen = HashSet::new();

        for (column_id, tasks) in assignments {
            let bucket = self
                .position(&column_id)
                .and_then(|position| staged.get_mut(position))
                .ok_or_else(|| BoardDomainError::UnknownColumn(column_id.clone()))?;
            for mut task in tasks {
                if !seen.insert(task.id().clone()) {
                    return Err(BoardDomainError::DuplicateTask(task.id().clone()));
                }
                if task.status() != &column_id {
                    task.set_status(column_id.clone());
                }
                bucket.push(task);
            }
        }

        for (column, tasks) in self.columns.iter_mut().zip(staged) {
            column.tasks = tasks;
        }
        Ok(seen.len())
    }

    /// Moves the task at `source_index` of `source` to `destination_index`
    /// of `destination`.
    ///
    /// The destination index is clamped to the destination's length. A
    /// request naming the task's current position is reported as
    /// [`MoveOutcome::Unchanged`] without validating anything else.
    ///
    /// # Errors
    ///
    /// Returns a [`MoveError`] describing why the board was left untouched.
    pub fn move_task(
        &mut self,
        source: &ColumnId,
        source_index: usize,
        destination: &ColumnId,
        destination_index: usize,
    ) -> MoveResult {
        if source == destination && source_index == destination_index {
            return Ok(MoveOutcome::Unchanged);
        }

        let invalid_source = || MoveError::InvalidSource {
            column: source.clone(),
            index: source_index,
        };
        let source_position = self
            .position(source)
            .filter(|&position| {
                self.columns
                    .get(position)
                    .is_some_and(|column| source_index < column.len())
            })
            .ok_or_else(invalid_source)?;
        let destination_position = self
            .position(destination)
            .ok_or_else(|| MoveError::UnknownDestinationColumn(destination.clone()))?;

        if source_position == destination_position {
            let column = self
                .columns
                .get_mut(source_position)
                .ok_or_else(invalid_source)?;
            return Ok(column.reorder(source_index, destination_index));
        }

        let (from, to) = pair_mut(&mut self.columns, source_position, destination_position)
            .ok_or_else(invalid_source)?;
        if let Some(capacity) = to.capacity().filter(|_| to.is_full()) {
            return Err(MoveError::RejectedCapacity {
                column: destination.clone(),
                capacity,
            });
        }

        let mut task = from.tasks.remove(source_index);
        task.set_status(destination.clone());
        let task_id = task.id().clone();
        let target = destination_index.min(to.len());
        to.tasks.insert(target, task);

        Ok(MoveOutcome::Moved(MovedTask {
            task_id,
            from: Slot::new(source.clone(), source_index),
            to: Slot::new(destination.clone(), target),
        }))
    }

    /// Removes a task wherever it is. Returns its former slot and record, or
    /// `None` when the task is not on the board.
    pub fn remove_task(&mut self, task_id: &TaskId) -> Option<(Slot, Task)> {
        self.columns.iter_mut().find_map(|column| {
            let index = column.position_of(task_id)?;
            let task = column.tasks.remove(index);
            Some((Slot::new(column.id().clone(), index), task))
        })
    }

    /// Appends an externally created task to the column named by its status.
    ///
    /// Capacity is not enforced: the task already exists upstream.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::DuplicateTask`] when the task is already
    /// on the board or [`BoardDomainError::UnknownColumn`] when its status is
    /// not a column.
    pub fn insert_task(&mut self, task: Task) -> Result<Slot, BoardDomainError> {
        if self.locate(task.id()).is_some() {
            return Err(BoardDomainError::DuplicateTask(task.id().clone()));
        }
        let column = self
            .columns
            .iter_mut()
            .find(|column| column.id() == task.status())
            .ok_or_else(|| BoardDomainError::UnknownColumn(task.status().clone()))?;
        let slot = Slot::new(column.id().clone(), column.len());
        column.tasks.push(task);
        Ok(slot)
    }

    /// Replaces a task's record without changing its position.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::TaskNotFound`] when the task is absent or
    /// [`BoardDomainError::StatusChangeRequiresMove`] when the new record
    /// names a different column.
    pub fn update_task(&mut self, task: Task) -> Result<Slot, BoardDomainError> {
        let (column, index) = self
            .columns
            .iter_mut()
            .find_map(|column| column.position_of(task.id()).map(|index| (column, index)))
            .ok_or_else(|| BoardDomainError::TaskNotFound(task.id().clone()))?;
        if column.id() != task.status() {
            return Err(BoardDomainError::StatusChangeRequiresMove {
                task_id: task.id().clone(),
                current: column.id().clone(),
                requested: task.status().clone(),
            });
        }
        let slot = Slot::new(column.id().clone(), index);
        let existing = column
            .tasks
            .get_mut(index)
            .ok_or_else(|| BoardDomainError::TaskNotFound(task.id().clone()))?;
        *existing = task;
        Ok(slot)
    }

    /// Undoes a move, putting the task back at the receipt's source slot.
    ///
    /// Capacity is bypassed since the restored arrangement was valid before.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::TaskNotFound`] when the task has left the
    /// board or [`BoardDomainError::UnknownColumn`] when the source column
    /// does not exist. The board is unchanged on error.
    pub fn revert_move(&mut self, receipt: &MovedTask) -> Result<(), BoardDomainError> {
        let origin = receipt.from.column.clone();
        if self.position(&origin).is_none() {
            return Err(BoardDomainError::UnknownColumn(origin));
        }
        let (_, mut task) = self
            .remove_task(&receipt.task_id)
            .ok_or_else(|| BoardDomainError::TaskNotFound(receipt.task_id.clone()))?;
        task.set_status(origin.clone());

        let column = self
            .columns
            .iter_mut()
            .find(|column| column.id() == &origin)
            .ok_or(BoardDomainError::UnknownColumn(origin))?;
        let index = receipt.from.index.min(column.len());
        column.tasks.insert(index, task);
        Ok(())
    }

    /// Returns the slot currently holding the task.
    #[must_use]
    pub fn locate(&self, task_id: &TaskId) -> Option<Slot> {
        self.columns.iter().find_map(|column| {
            column
                .position_of(task_id)
                .map(|index| Slot::new(column.id().clone(), index))
        })
    }

    /// Looks up a column by identifier.
    #[must_use]
    pub fn column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|column| column.id() == id)
    }

    /// Returns the columns in display order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns the number of tasks across all columns.
    #[must_use]
    pub fn task_count(&self) -> usize {
        self.columns.iter().map(Column::len).sum()
    }

    /// Returns an owned copy for rendering.
    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            columns: self.columns.clone(),
        }
    }

    fn position(&self, id: &ColumnId) -> Option<usize> {
        self.columns.iter().position(|column| column.id() == id)
    }
}

/// Borrows two distinct columns mutably.
fn pair_mut(columns: &mut [Column], first: usize, second: usize) -> Option<(&mut Column, &mut Column)> {
    if first < second {
        let (left, right) = columns.split_at_mut(second);
        Some((left.get_mut(first)?, right.first_mut()?))
    } else if second < first {
        let (left, right) = columns.split_at_mut(first);
        Some((right.first_mut()?, left.get_mut(second)?))
    } else {
        None
    }
}
