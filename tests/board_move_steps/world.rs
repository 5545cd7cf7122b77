//! Shared world state for board move BDD scenarios.

use std::sync::Arc;

use eyre::WrapErr;
use mockable::DefaultClock;
use rstest::fixture;
use taskboard::board::{
    adapters::memory::{InMemoryTaskMutationService, InMemoryTaskSource},
    domain::{BoardLayout, Column, ColumnId, MoveOutcome, ProjectId, RawId, TaskRecord},
    services::{BoardStateManager, BoardSyncResult, BoardSyncService},
};

/// Service type used by the BDD world.
pub type TestBoardService =
    BoardSyncService<InMemoryTaskSource, InMemoryTaskMutationService, DefaultClock>;

const PROJECT: ProjectId = ProjectId::new(1);

/// Scenario world for board move behaviour tests.
///
/// Given steps describe the backend's tasks; the board is built from them
/// on first use.
pub struct BoardMoveWorld {
    pub layout: BoardLayout,
    pub records: Vec<TaskRecord>,
    pub source: InMemoryTaskSource,
    pub mutations: InMemoryTaskMutationService,
    pub service: Option<TestBoardService>,
    pub last_move: Option<BoardSyncResult<MoveOutcome>>,
}

impl BoardMoveWorld {
    /// Creates a world over the default layout with no tasks.
    #[must_use]
    pub fn new() -> Self {
        Self {
            layout: BoardLayout::default(),
            records: Vec::new(),
            source: InMemoryTaskSource::new(),
            mutations: InMemoryTaskMutationService::new(),
            service: None,
            last_move: None,
        }
    }

    /// Adds a backend record for a task in `column`.
    pub fn add_record(&mut self, task_id: &str, column: &str) {
        self.records.push(TaskRecord {
            task_id: Some(RawId::Text(task_id.to_owned())),
            task_name: Some(format!("Task {task_id}")),
            status_id: Some(RawId::Text(column.to_owned())),
            ..TaskRecord::default()
        });
    }

    /// Returns the sync service, refreshing it from the recorded tasks on
    /// first use.
    ///
    /// # Errors
    ///
    /// Returns an error if the project cannot be stored or refreshed.
    pub fn service(&mut self) -> Result<&mut TestBoardService, eyre::Report> {
        if self.service.is_none() {
            self.source.set_project(PROJECT, self.records.clone())?;
            let mut service = BoardSyncService::new(
                Arc::new(self.source.clone()),
                Arc::new(self.mutations.clone()),
                BoardStateManager::new(self.layout.clone(), Arc::new(DefaultClock)),
            );
            run_async(service.refresh(PROJECT)).wrap_err("load scenario board")?;
            self.service = Some(service);
        }
        self.service
            .as_mut()
            .ok_or_else(|| eyre::eyre!("scenario board was not built"))
    }

    /// Looks up a column on the built board.
    ///
    /// # Errors
    ///
    /// Returns an error if the board has not been built or lacks the column.
    pub fn column(&self, id: &str) -> Result<&Column, eyre::Report> {
        let service = self
            .service
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing board in scenario world"))?;
        service
            .manager()
            .get_column(&ColumnId::new(id)?)
            .ok_or_else(|| eyre::eyre!("unknown column {id}"))
    }
}

impl Default for BoardMoveWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BoardMoveWorld {
    BoardMoveWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Splits a comma-separated list of task identifiers.
pub fn split_ids(list: &str) -> Vec<&str> {
    list.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .collect()
}
