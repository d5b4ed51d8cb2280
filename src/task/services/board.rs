//! Service layer for task and subtask operations.

use crate::task::{
    domain::{Record, RecordId, RecordPatch, Subtask, Task, TaskId, TaskWithSubtasks},
    ports::{TaskStore, TaskStoreError},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    deadline: DateTime<Utc>,
}

impl CreateTaskRequest {
    /// Creates a request with the required task fields.
    #[must_use]
    pub fn new(title: impl Into<String>, deadline: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            deadline,
        }
    }
}

/// Request payload for creating a subtask under an existing task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateSubtaskRequest {
    title: String,
    deadline: DateTime<Utc>,
}

impl CreateSubtaskRequest {
    /// Creates a request with the required subtask fields.
    #[must_use]
    pub fn new(title: impl Into<String>, deadline: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            deadline,
        }
    }
}

/// Service-level errors for task board operations.
#[derive(Debug, Error)]
pub enum TaskBoardError {
    /// The addressed record does not exist.
    #[error("record not found: {0}")]
    NotFound(RecordId),
    /// Store operation failed.
    #[error(transparent)]
    Store(TaskStoreError),
}

impl From<TaskStoreError> for TaskBoardError {
    fn from(err: TaskStoreError) -> Self {
        match err {
            TaskStoreError::NotFound(id) => Self::NotFound(id),
            other => Self::Store(other),
        }
    }
}

/// Result type for task board service operations.
pub type TaskBoardResult<T> = Result<T, TaskBoardError>;

/// Task board orchestration service.
pub struct TaskBoardService<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> Clone for TaskBoardService<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<S, C> TaskBoardService<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync,
{
    /// Creates a new task board service.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    /// Returns the current time according to the service clock.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.utc()
    }

    /// Lists every task together with its subtasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::Store`] when the store query fails.
    pub async fn list_tasks(&self) -> TaskBoardResult<Vec<TaskWithSubtasks>> {
        Ok(self.store.list_tasks().await?)
    }

    /// Creates a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::Store`] when the store rejects persistence.
    pub async fn create_task(&self, request: CreateTaskRequest) -> TaskBoardResult<Task> {
        let task = Task::new(request.title, request.deadline, &*self.clock);
        self.store.insert_task(&task).await?;
        Ok(task)
    }

    /// Creates a subtask under an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::NotFound`] when `task_id` does not reference
    /// an existing task, or [`TaskBoardError::Store`] when persistence fails.
    pub async fn create_subtask(
        &self,
        task_id: TaskId,
        request: CreateSubtaskRequest,
    ) -> TaskBoardResult<Subtask> {
        let subtask = Subtask::new(task_id, request.title, request.deadline, &*self.clock);
        self.store.insert_subtask(&subtask).await?;
        Ok(subtask)
    }

    /// Retrieves a task (with its subtasks) or a subtask.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::NotFound`] when the record does not exist.
    pub async fn get(&self, id: RecordId) -> TaskBoardResult<Record> {
        match id {
            RecordId::Task(task_id) => {
                let task = self
                    .store
                    .find_task(task_id)
                    .await?
                    .ok_or(TaskBoardError::NotFound(id))?;
                self.bundle(task).await
            }
            RecordId::Subtask(subtask_id) => {
                let subtask = self
                    .store
                    .find_subtask(subtask_id)
                    .await?
                    .ok_or(TaskBoardError::NotFound(id))?;
                Ok(Record::Subtask(subtask))
            }
        }
    }

    /// Applies a field patch to a task or subtask and returns the result.
    ///
    /// Concurrent updates to the same record are last-write-wins.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::NotFound`] when the record does not exist.
    pub async fn update(&self, id: RecordId, patch: RecordPatch) -> TaskBoardResult<Record> {
        match id {
            RecordId::Task(task_id) => {
                let mut task = self
                    .store
                    .find_task(task_id)
                    .await?
                    .ok_or(TaskBoardError::NotFound(id))?;
                if task.apply(&patch, &*self.clock) {
                    self.store.update_task(&task).await?;
                }
                self.bundle(task).await
            }
            RecordId::Subtask(subtask_id) => {
                let mut subtask = self
                    .store
                    .find_subtask(subtask_id)
                    .await?
                    .ok_or(TaskBoardError::NotFound(id))?;
                if subtask.apply(&patch, &*self.clock) {
                    self.store.update_subtask(&subtask).await?;
                }
                Ok(Record::Subtask(subtask))
            }
        }
    }

    /// Deletes a task (cascading to its subtasks) or a subtask.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::NotFound`] when the record does not exist.
    pub async fn delete(&self, id: RecordId) -> TaskBoardResult<()> {
        match id {
            RecordId::Task(task_id) => self.store.delete_task(task_id).await?,
            RecordId::Subtask(subtask_id) => self.store.delete_subtask(subtask_id).await?,
        }
        Ok(())
    }

    async fn bundle(&self, task: Task) -> TaskBoardResult<Record> {
        let subtasks = self.store.list_subtasks(task.id()).await?;
        Ok(Record::Task(TaskWithSubtasks::new(task, subtasks)))
    }
}
