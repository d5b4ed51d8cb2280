//! In-memory task store used by tests and database-less deployments.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::task::{
    domain::{RecordId, Subtask, SubtaskId, Task, TaskId, TaskWithSubtasks},
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
};

/// Thread-safe in-memory task store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskStore {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
    task_order: Vec<TaskId>,
    subtasks: HashMap<SubtaskId, Subtask>,
    // Child identifiers per task, in insertion order.
    children: HashMap<TaskId, Vec<SubtaskId>>,
}

impl InMemoryTaskState {
    fn subtasks_of(&self, task_id: TaskId) -> Vec<Subtask> {
        self.children
            .get(&task_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| self.subtasks.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl InMemoryTaskStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> TaskStoreResult<RwLockReadGuard<'_, InMemoryTaskState>> {
        self.state
            .read()
            .map_err(|err| TaskStoreError::persistence(std::io::Error::other(err.to_string())))
    }

    fn write(&self) -> TaskStoreResult<RwLockWriteGuard<'_, InMemoryTaskState>> {
        self.state
            .write()
            .map_err(|err| TaskStoreError::persistence(std::io::Error::other(err.to_string())))
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn insert_task(&self, task: &Task) -> TaskStoreResult<()> {
        let mut state = self.write()?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskStoreError::DuplicateRecord(RecordId::Task(task.id())));
        }
        state.task_order.push(task.id());
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn insert_subtask(&self, subtask: &Subtask) -> TaskStoreResult<()> {
        let mut state = self.write()?;
        if !state.tasks.contains_key(&subtask.task_id()) {
            return Err(TaskStoreError::NotFound(RecordId::Task(subtask.task_id())));
        }
        if state.subtasks.contains_key(&subtask.id()) {
            return Err(TaskStoreError::DuplicateRecord(RecordId::Subtask(
                subtask.id(),
            )));
        }
        state
            .children
            .entry(subtask.task_id())
            .or_default()
            .push(subtask.id());
        state.subtasks.insert(subtask.id(), subtask.clone());
        Ok(())
    }

    async fn list_tasks(&self) -> TaskStoreResult<Vec<TaskWithSubtasks>> {
        let state = self.read()?;
        let tasks = state
            .task_order
            .iter()
            .filter_map(|id| state.tasks.get(id))
            .map(|task| TaskWithSubtasks::new(task.clone(), state.subtasks_of(task.id())))
            .collect();
        Ok(tasks)
    }

    async fn find_task(&self, id: TaskId) -> TaskStoreResult<Option<Task>> {
        let state = self.read()?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn find_subtask(&self, id: SubtaskId) -> TaskStoreResult<Option<Subtask>> {
        let state = self.read()?;
        Ok(state.subtasks.get(&id).cloned())
    }

    async fn list_subtasks(&self, task_id: TaskId) -> TaskStoreResult<Vec<Subtask>> {
        let state = self.read()?;
        Ok(state.subtasks_of(task_id))
    }

    async fn update_task(&self, task: &Task) -> TaskStoreResult<()> {
        let mut state = self.write()?;
        let stored = state
            .tasks
            .get_mut(&task.id())
            .ok_or(TaskStoreError::NotFound(RecordId::Task(task.id())))?;
        *stored = task.clone();
        Ok(())
    }

    async fn update_subtask(&self, subtask: &Subtask) -> TaskStoreResult<()> {
        let mut state = self.write()?;
        let stored = state
            .subtasks
            .get_mut(&subtask.id())
            .ok_or(TaskStoreError::NotFound(RecordId::Subtask(subtask.id())))?;
        *stored = subtask.clone();
        Ok(())
    }

    async fn delete_task(&self, id: TaskId) -> TaskStoreResult<()> {
        let mut state = self.write()?;
        if state.tasks.remove(&id).is_none() {
            return Err(TaskStoreError::NotFound(RecordId::Task(id)));
        }
        state.task_order.retain(|task_id| *task_id != id);
        // Cascade under the same write guard so no reader sees orphans.
        for subtask_id in state.children.remove(&id).unwrap_or_default() {
            state.subtasks.remove(&subtask_id);
        }
        Ok(())
    }

    async fn delete_subtask(&self, id: SubtaskId) -> TaskStoreResult<()> {
        let mut state = self.write()?;
        let subtask = state
            .subtasks
            .remove(&id)
            .ok_or(TaskStoreError::NotFound(RecordId::Subtask(id)))?;
        if let Some(ids) = state.children.get_mut(&subtask.task_id()) {
            ids.retain(|subtask_id| *subtask_id != id);
            if ids.is_empty() {
                state.children.remove(&subtask.task_id());
            }
        }
        Ok(())
    }
}
