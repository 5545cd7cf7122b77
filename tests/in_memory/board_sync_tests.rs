//! In-memory integration tests for refreshing and persisting board changes.

use super::helpers::{
    PROJECT, TestService, column, column_tasks, mutations, service_over, source, task,
};
use rstest::rstest;
use taskboard::board::{
    adapters::memory::{InMemoryTaskMutationService, InMemoryTaskSource},
    domain::{BoardLayout, MoveError, MoveOutcome, Priority, ProjectId},
    ports::{TaskMutationError, TaskSourceError},
    services::{BoardSyncError, MoveRequest, PersistFailurePolicy},
};

async fn refreshed(
    source: &InMemoryTaskSource,
    mutations: &InMemoryTaskMutationService,
    layout: BoardLayout,
) -> Result<TestService, eyre::Report> {
    let mut service = service_over(source, mutations, layout);
    let loaded = service.refresh(PROJECT).await?;
    eyre::ensure!(loaded == 3, "expected three tasks, loaded {loaded}");
    Ok(service)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn refresh_places_backend_tasks_in_their_columns(
    source: InMemoryTaskSource,
    mutations: InMemoryTaskMutationService,
) -> Result<(), eyre::Report> {
    let service = refreshed(&source, &mutations, BoardLayout::default()).await?;

    eyre::ensure!(column_tasks(&service, "backlog") == vec!["1", "3"]);
    eyre::ensure!(column_tasks(&service, "dev") == vec!["2"]);
    eyre::ensure!(column_tasks(&service, "done").is_empty());

    let design = service
        .manager()
        .get_column(&column("backlog"))
        .and_then(|backlog| backlog.tasks().first().cloned())
        .ok_or_else(|| eyre::eyre!("missing first backlog task"))?;
    eyre::ensure!(design.priority() == Priority::Medium);
    eyre::ensure!(design.assignees().len() == 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cross_column_move_is_persisted(
    source: InMemoryTaskSource,
    mutations: InMemoryTaskMutationService,
) -> Result<(), eyre::Report> {
    let mut service = refreshed(&source, &mutations, BoardLayout::default()).await?;

    let outcome = service
        .move_task(&MoveRequest::new(column("backlog"), 1, column("progress"), 0))
        .await?;

    eyre::ensure!(matches!(outcome, MoveOutcome::Moved(_)));
    eyre::ensure!(column_tasks(&service, "progress") == vec!["3"]);
    eyre::ensure!(mutations.persisted_status(&task("3"))? == Some(column("progress")));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reorder_within_a_column_is_local_only(
    source: InMemoryTaskSource,
    mutations: InMemoryTaskMutationService,
) -> Result<(), eyre::Report> {
    let mut service = refreshed(&source, &mutations, BoardLayout::default()).await?;

    service
        .move_task(&MoveRequest::new(column("backlog"), 0, column("backlog"), 1))
        .await?;

    eyre::ensure!(column_tasks(&service, "backlog") == vec!["3", "1"]);
    eyre::ensure!(mutations.persisted_status(&task("1"))?.is_none());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn full_column_rejects_the_move_before_persisting(
    source: InMemoryTaskSource,
    mutations: InMemoryTaskMutationService,
) -> Result<(), eyre::Report> {
    let layout = BoardLayout::default().with_capacity(&column("dev"), 1)?;
    let mut service = refreshed(&source, &mutations, layout).await?;

    let result = service
        .move_task(&MoveRequest::new(column("backlog"), 0, column("dev"), 0))
        .await;

    eyre::ensure!(matches!(
        result,
        Err(BoardSyncError::Move(MoveError::RejectedCapacity { capacity: 1, .. }))
    ));
    eyre::ensure!(column_tasks(&service, "backlog") == vec!["1", "3"]);
    eyre::ensure!(column_tasks(&service, "dev") == vec!["2"]);
    eyre::ensure!(mutations.persisted_status(&task("1"))?.is_none());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unpersisted_move_stays_until_the_next_refresh(
    source: InMemoryTaskSource,
    mutations: InMemoryTaskMutationService,
) -> Result<(), eyre::Report> {
    let mut service = refreshed(&source, &mutations, BoardLayout::default()).await?;
    mutations.fail_with(TaskMutationError::Rejected("read-only project".to_owned()))?;

    let result = service
        .move_task(&MoveRequest::new(column("dev"), 0, column("done"), 0))
        .await;

    eyre::ensure!(matches!(
        result,
        Err(BoardSyncError::MoveNotPersisted {
            rolled_back: false,
            ..
        })
    ));
    eyre::ensure!(column_tasks(&service, "done") == vec!["2"]);

    service.refresh(PROJECT).await?;
    eyre::ensure!(column_tasks(&service, "dev") == vec!["2"]);
    eyre::ensure!(column_tasks(&service, "done").is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rollback_policy_restores_the_board(
    source: InMemoryTaskSource,
    mutations: InMemoryTaskMutationService,
) -> Result<(), eyre::Report> {
    let mut service = refreshed(&source, &mutations, BoardLayout::default())
        .await?
        .with_policy(PersistFailurePolicy::RollBack);
    mutations.fail_with(TaskMutationError::Rejected("read-only project".to_owned()))?;

    let result = service
        .move_task(&MoveRequest::new(column("backlog"), 0, column("done"), 0))
        .await;

    eyre::ensure!(matches!(
        result,
        Err(BoardSyncError::MoveNotPersisted {
            rolled_back: true,
            ..
        })
    ));
    eyre::ensure!(column_tasks(&service, "backlog") == vec!["1", "3"]);
    eyre::ensure!(column_tasks(&service, "done").is_empty());

    mutations.clear_failure()?;
    service
        .move_task(&MoveRequest::new(column("backlog"), 0, column("done"), 0))
        .await?;
    eyre::ensure!(mutations.persisted_status(&task("1"))? == Some(column("done")));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_removes_the_task_after_persisting(
    source: InMemoryTaskSource,
    mutations: InMemoryTaskMutationService,
) -> Result<(), eyre::Report> {
    let mut service = refreshed(&source, &mutations, BoardLayout::default()).await?;

    let removed = service.delete_task(&task("2")).await?;

    eyre::ensure!(removed.is_some_and(|gone| gone.id() == &task("2")));
    eyre::ensure!(column_tasks(&service, "dev").is_empty());
    eyre::ensure!(mutations.deleted()? == vec![task("2")]);

    let again = service.delete_task(&task("2")).await;
    eyre::ensure!(matches!(
        again,
        Err(BoardSyncError::ChangeNotPersisted {
            source: TaskMutationError::NotFound(_),
            ..
        })
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_is_persisted_and_applied_in_place(
    source: InMemoryTaskSource,
    mutations: InMemoryTaskMutationService,
) -> Result<(), eyre::Report> {
    let mut service = refreshed(&source, &mutations, BoardLayout::default()).await?;
    let current = service
        .manager()
        .get_column(&column("backlog"))
        .and_then(|backlog| backlog.tasks().get(1).cloned())
        .ok_or_else(|| eyre::eyre!("missing second backlog task"))?;

    let edited = current.with_priority(Priority::High);
    let slot = service.update_task(edited).await?;

    eyre::ensure!(slot.column == column("backlog") && slot.index == 1);
    let persisted = mutations
        .persisted_task(&task("3"))?
        .ok_or_else(|| eyre::eyre!("update was not persisted"))?;
    eyre::ensure!(persisted.priority() == Priority::High);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn refresh_of_an_unknown_project_fails(
    source: InMemoryTaskSource,
    mutations: InMemoryTaskMutationService,
) {
    let mut service = service_over(&source, &mutations, BoardLayout::default());

    let result = service.refresh(ProjectId::new(9)).await;

    assert!(matches!(
        result,
        Err(BoardSyncError::Source(TaskSourceError::ProjectNotFound(_)))
    ));
    assert_eq!(service.manager().task_count(), 0);
}
