//! Shared test helpers for in-memory board integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskboard::board::{
    adapters::memory::{InMemoryTaskMutationService, InMemoryTaskSource},
    domain::{BoardLayout, ColumnId, ProjectId, TaskId, TaskRecord},
    services::{BoardStateManager, BoardSyncService},
};

/// Sync service wired to in-memory adapters.
pub type TestService =
    BoardSyncService<InMemoryTaskSource, InMemoryTaskMutationService, DefaultClock>;

/// Project served by the [`source`] fixture.
pub const PROJECT: ProjectId = ProjectId::new(55);

/// Backend payload for [`PROJECT`]: two tasks in the backlog, one in
/// development, using the backend's field names.
pub const PROJECT_TASKS_JSON: &str = r#"[
    {"taskId": 1, "taskName": "Design login page", "statusId": "backlog",
     "priorityTask": {"priorityId": 2, "priority": "Medium"},
     "assigness": [{"id": 7, "name": "Linh"}]},
    {"taskId": 2, "taskName": "Write API docs", "statusId": "dev",
     "originalEstimate": 5, "timeTrackingSpent": 1, "timeTrackingRemaining": 4},
    {"taskId": 3, "taskName": "Set up CI", "statusId": "backlog",
     "listUserAsign": []}
]"#;

/// Provides a task source serving [`PROJECT_TASKS_JSON`].
#[fixture]
pub fn source() -> InMemoryTaskSource {
    let source = InMemoryTaskSource::new();
    let records = TaskRecord::list_from_json(PROJECT_TASKS_JSON).expect("valid project payload");
    source
        .set_project(PROJECT, records)
        .expect("project stored");
    source
}

/// Provides a recording mutation service.
#[fixture]
pub fn mutations() -> InMemoryTaskMutationService {
    InMemoryTaskMutationService::new()
}

/// Builds a sync service over the default layout.
pub fn service_over(
    source: &InMemoryTaskSource,
    mutations: &InMemoryTaskMutationService,
    layout: BoardLayout,
) -> TestService {
    BoardSyncService::new(
        Arc::new(source.clone()),
        Arc::new(mutations.clone()),
        BoardStateManager::new(layout, Arc::new(DefaultClock)),
    )
}

/// Parses a column identifier.
pub fn column(id: &str) -> ColumnId {
    ColumnId::new(id).expect("valid column id")
}

/// Parses a task identifier.
pub fn task(id: &str) -> TaskId {
    TaskId::new(id).expect("valid task id")
}

/// Returns the task identifiers of a column in display order.
pub fn column_tasks(service: &TestService, id: &str) -> Vec<String> {
    service
        .manager()
        .get_column(&column(id))
        .map(|found| {
            found
                .tasks()
                .iter()
                .map(|entry| entry.id().to_string())
                .collect()
        })
        .unwrap_or_default()
}
