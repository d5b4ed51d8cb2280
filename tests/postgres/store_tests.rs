//! Store contract tests against `PostgreSQL`.
//!
//! Each test runs in its own temporary database.

use std::sync::Arc;

use super::helpers::temporary_store;
use crate::test_helpers::{FixedClock, reference_time};
use chrono::{SubsecRound, TimeDelta};
use rstest::rstest;
use taskboard::task::{
    domain::{
        Record, RecordId, RecordPatch, Subtask, SubtaskId, Task, TaskId, TaskWithSubtasks,
    },
    ports::{TaskStore, TaskStoreError},
    services::{CreateSubtaskRequest, CreateTaskRequest, TaskBoardError, TaskBoardService},
};

#[rstest]
#[ignore = "requires TASKBOARD_TEST_DATABASE_URL"]
#[tokio::test(flavor = "multi_thread")]
async fn task_round_trips_with_all_fields() -> Result<(), eyre::Report> {
    let db = temporary_store().await?;
    let repo = &db.store;
    let clock = FixedClock::reference();
    let task = Task::new("Round trip", reference_time() + TimeDelta::days(1), &clock);

    repo.insert_task(&task).await?;
    let found = repo.find_task(task.id()).await?;

    eyre::ensure!(found.as_ref() == Some(&task), "stored task differs: {found:?}");
    Ok(())
}

#[rstest]
#[ignore = "requires TASKBOARD_TEST_DATABASE_URL"]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_task_is_rejected() -> Result<(), eyre::Report> {
    let db = temporary_store().await?;
    let repo = &db.store;
    let task = Task::new("Duplicate", reference_time(), &FixedClock::reference());
    repo.insert_task(&task).await?;

    let result = repo.insert_task(&task).await;

    eyre::ensure!(
        matches!(result, Err(TaskStoreError::DuplicateRecord(RecordId::Task(id))) if id == task.id()),
        "expected duplicate rejection, got {result:?}"
    );
    Ok(())
}

#[rstest]
#[ignore = "requires TASKBOARD_TEST_DATABASE_URL"]
#[tokio::test(flavor = "multi_thread")]
async fn subtask_under_missing_task_is_not_found() -> Result<(), eyre::Report> {
    let db = temporary_store().await?;
    let repo = &db.store;
    let missing = TaskId::new();
    let orphan = Subtask::new(missing, "Orphan", reference_time(), &FixedClock::reference());

    let result = repo.insert_subtask(&orphan).await;

    eyre::ensure!(
        matches!(result, Err(TaskStoreError::NotFound(RecordId::Task(id))) if id == missing),
        "expected missing parent, got {result:?}"
    );
    eyre::ensure!(
        repo.find_subtask(orphan.id()).await?.is_none(),
        "orphan must not be stored"
    );
    Ok(())
}

#[rstest]
#[ignore = "requires TASKBOARD_TEST_DATABASE_URL"]
#[tokio::test(flavor = "multi_thread")]
async fn list_groups_subtasks_under_parents() -> Result<(), eyre::Report> {
    let db = temporary_store().await?;
    let repo = &db.store;
    let clock = FixedClock::reference();
    let parent = Task::new("Grouping parent", reference_time(), &clock);
    let other = Task::new("Grouping other", reference_time(), &clock);
    repo.insert_task(&parent).await?;
    repo.insert_task(&other).await?;
    let child = Subtask::new(parent.id(), "Grouping child", reference_time(), &clock);
    repo.insert_subtask(&child).await?;

    let listed = repo.list_tasks().await?;
    let parent_bundle = listed
        .iter()
        .find(|bundle| bundle.task().id() == parent.id())
        .ok_or_else(|| eyre::eyre!("parent missing from listing"))?;
    let other_bundle = listed
        .iter()
        .find(|bundle| bundle.task().id() == other.id())
        .ok_or_else(|| eyre::eyre!("other task missing from listing"))?;

    eyre::ensure!(parent_bundle.subtasks() == [child.clone()], "child not nested");
    eyre::ensure!(other_bundle.subtasks().is_empty(), "unexpected children");
    eyre::ensure!(
        repo.list_subtasks(parent.id()).await? == vec![child],
        "list_subtasks mismatch"
    );
    Ok(())
}

#[rstest]
#[ignore = "requires TASKBOARD_TEST_DATABASE_URL"]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_task_cascades_to_subtasks() -> Result<(), eyre::Report> {
    let db = temporary_store().await?;
    let repo = &db.store;
    let clock = FixedClock::reference();
    let parent = Task::new("Cascade parent", reference_time(), &clock);
    repo.insert_task(&parent).await?;
    let children = [
        Subtask::new(parent.id(), "Cascade one", reference_time(), &clock),
        Subtask::new(parent.id(), "Cascade two", reference_time(), &clock),
    ];
    for child in &children {
        repo.insert_subtask(child).await?;
    }

    repo.delete_task(parent.id()).await?;

    eyre::ensure!(repo.find_task(parent.id()).await?.is_none(), "parent survived");
    for child in &children {
        eyre::ensure!(
            repo.find_subtask(child.id()).await?.is_none(),
            "subtask {} survived its parent",
            child.id()
        );
    }
    let second = repo.delete_task(parent.id()).await;
    eyre::ensure!(
        matches!(second, Err(TaskStoreError::NotFound(_))),
        "second delete should report not found"
    );
    Ok(())
}

#[rstest]
#[ignore = "requires TASKBOARD_TEST_DATABASE_URL"]
#[tokio::test(flavor = "multi_thread")]
async fn updates_persist_and_missing_rows_are_not_found() -> Result<(), eyre::Report> {
    let db = temporary_store().await?;
    let repo = &db.store;
    let clock = FixedClock::reference();
    let mut task = Task::new("Before", reference_time(), &clock);
    repo.insert_task(&task).await?;

    let later = FixedClock(reference_time() + TimeDelta::minutes(5));
    task.apply(
        &RecordPatch::new().with_title("After").with_completed(true),
        &later,
    );
    repo.update_task(&task).await?;
    eyre::ensure!(
        repo.find_task(task.id()).await?.as_ref() == Some(&task),
        "update not persisted"
    );

    let ghost = Subtask::new(task.id(), "Ghost", reference_time(), &clock);
    eyre::ensure!(
        matches!(
            repo.update_subtask(&ghost).await,
            Err(TaskStoreError::NotFound(RecordId::Subtask(_)))
        ),
        "updating a missing subtask should report not found"
    );
    eyre::ensure!(
        matches!(
            repo.delete_subtask(SubtaskId::new()).await,
            Err(TaskStoreError::NotFound(RecordId::Subtask(_)))
        ),
        "deleting a missing subtask should report not found"
    );
    Ok(())
}

#[rstest]
#[ignore = "requires TASKBOARD_TEST_DATABASE_URL"]
#[tokio::test(flavor = "multi_thread")]
async fn service_runs_against_postgres() -> Result<(), eyre::Report> {
    let db = temporary_store().await?;
    let repo = &db.store;
    let service = TaskBoardService::new(Arc::clone(repo), Arc::new(FixedClock::reference()));
    let task = service
        .create_task(CreateTaskRequest::new("Service parent", reference_time()))
        .await?;
    let subtask = service
        .create_subtask(
            task.id(),
            CreateSubtaskRequest::new("Service child", reference_time()),
        )
        .await?;

    let record = service
        .update(
            RecordId::Subtask(subtask.id()),
            RecordPatch::new().with_completed(true),
        )
        .await?;
    eyre::ensure!(
        matches!(&record, Record::Subtask(updated) if updated.completed()),
        "subtask should be completed"
    );

    service.delete(RecordId::Task(task.id())).await?;
    let gone = service.get(RecordId::Subtask(subtask.id())).await;
    eyre::ensure!(
        matches!(gone, Err(TaskBoardError::NotFound(_))),
        "subtask should be removed with its task"
    );
    Ok(())
}

#[rstest]
#[ignore = "requires TASKBOARD_TEST_DATABASE_URL"]
#[tokio::test(flavor = "multi_thread")]
async fn nanosecond_clock_readings_survive_a_round_trip() -> Result<(), eyre::Report> {
    let db = temporary_store().await?;
    let precise = reference_time() + TimeDelta::nanoseconds(123_456_789);
    let service = TaskBoardService::new(Arc::clone(&db.store), Arc::new(FixedClock(precise)));

    let task = service
        .create_task(CreateTaskRequest::new("Precise", precise + TimeDelta::days(1)))
        .await?;
    let subtask = service
        .create_subtask(task.id(), CreateSubtaskRequest::new("Precise child", precise))
        .await?;

    eyre::ensure!(
        task.created_at() == precise.trunc_subsecs(6),
        "creation time must keep microseconds only"
    );
    let stored_task = db.store.find_task(task.id()).await?;
    eyre::ensure!(
        stored_task.as_ref() == Some(&task),
        "stored task differs: {stored_task:?}"
    );
    let stored_subtask = db.store.find_subtask(subtask.id()).await?;
    eyre::ensure!(
        stored_subtask.as_ref() == Some(&subtask),
        "stored subtask differs: {stored_subtask:?}"
    );

    let updated = service
        .update(RecordId::Task(task.id()), RecordPatch::new().with_title("Renamed"))
        .await?;
    let fetched = service.get(RecordId::Task(task.id())).await?;
    eyre::ensure!(fetched == updated, "fetched record differs from update result");
    Ok(())
}

#[rstest]
#[ignore = "requires TASKBOARD_TEST_DATABASE_URL"]
#[tokio::test(flavor = "multi_thread")]
async fn rows_sharing_a_timestamp_list_in_insertion_order() -> Result<(), eyre::Report> {
    let db = temporary_store().await?;
    let repo = &db.store;
    let clock = FixedClock::reference();
    let tasks: Vec<Task> = (0..6)
        .map(|index| Task::new(format!("ord{index}"), reference_time(), &clock))
        .collect();
    for task in &tasks {
        repo.insert_task(task).await?;
    }
    let Some(parent) = tasks.first() else {
        eyre::bail!("no tasks created");
    };
    let children: Vec<Subtask> = (0..6)
        .map(|index| Subtask::new(parent.id(), format!("child{index}"), reference_time(), &clock))
        .collect();
    for child in &children {
        repo.insert_subtask(child).await?;
    }

    let listed = repo.list_tasks().await?;
    let listed_ids: Vec<TaskId> = listed.iter().map(|bundle| bundle.task().id()).collect();
    let inserted_ids: Vec<TaskId> = tasks.iter().map(Task::id).collect();
    eyre::ensure!(
        listed_ids == inserted_ids,
        "tasks out of insertion order: {listed_ids:?}"
    );
    eyre::ensure!(
        listed.first().map(TaskWithSubtasks::subtasks) == Some(children.as_slice()),
        "nested subtasks out of insertion order"
    );
    eyre::ensure!(
        repo.list_subtasks(parent.id()).await? == children,
        "subtask listing out of insertion order"
    );
    Ok(())
}
