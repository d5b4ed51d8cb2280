//! Store port for task and subtask persistence.

use crate::task::domain::{RecordId, Subtask, SubtaskId, Task, TaskId, TaskWithSubtasks};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Task and subtask persistence contract.
///
/// Implementations own the parent/child invariant: a subtask is only stored
/// under an existing task, and deleting a task removes its subtasks in the
/// same step.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::DuplicateRecord`] when the identifier is
    /// already taken.
    async fn insert_task(&self, task: &Task) -> TaskStoreResult<()>;

    /// Stores a new subtask under its owning task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] carrying the parent task
    /// identifier when the owning task does not exist.
    async fn insert_subtask(&self, subtask: &Subtask) -> TaskStoreResult<()>;

    /// Returns every task with its subtasks, in insertion order.
    async fn list_tasks(&self) -> TaskStoreResult<Vec<TaskWithSubtasks>>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_task(&self, id: TaskId) -> TaskStoreResult<Option<Task>>;

    /// Finds a subtask by identifier.
    ///
    /// Returns `None` when the subtask does not exist.
    async fn find_subtask(&self, id: SubtaskId) -> TaskStoreResult<Option<Subtask>>;

    /// Returns the subtasks owned by a task, in insertion order.
    ///
    /// An unknown task yields an empty list.
    async fn list_subtasks(&self, task_id: TaskId) -> TaskStoreResult<Vec<Subtask>>;

    /// Overwrites the stored fields of an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the task does not exist.
    async fn update_task(&self, task: &Task) -> TaskStoreResult<()>;

    /// Overwrites the stored fields of an existing subtask.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the subtask does not exist.
    async fn update_subtask(&self, subtask: &Subtask) -> TaskStoreResult<()>;

    /// Deletes a task together with all of its subtasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the task does not exist.
    async fn delete_task(&self, id: TaskId) -> TaskStoreResult<()>;

    /// Deletes a single subtask.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the subtask does not exist.
    async fn delete_subtask(&self, id: SubtaskId) -> TaskStoreResult<()>;
}

/// Errors returned by task store implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskStoreError {
    /// A record with the same identifier already exists.
    #[error("duplicate record identifier: {0}")]
    DuplicateRecord(RecordId),

    /// The record was not found.
    #[error("record not found: {0}")]
    NotFound(RecordId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
