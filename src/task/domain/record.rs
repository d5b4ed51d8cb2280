//! Aggregate views returned by task board queries.

use super::{RecordId, Subtask, Task};

/// A task together with every subtask it owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskWithSubtasks {
    task: Task,
    subtasks: Vec<Subtask>,
}

impl TaskWithSubtasks {
    /// Bundles a task with its subtasks.
    #[must_use]
    pub const fn new(task: Task, subtasks: Vec<Subtask>) -> Self {
        Self { task, subtasks }
    }

    /// Returns the task.
    #[must_use]
    pub const fn task(&self) -> &Task {
        &self.task
    }

    /// Returns the owned subtasks in insertion order.
    #[must_use]
    pub fn subtasks(&self) -> &[Subtask] {
        &self.subtasks
    }
}

/// A single record addressed by [`RecordId`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    /// A task with its subtasks.
    Task(TaskWithSubtasks),
    /// A subtask.
    Subtask(Subtask),
}

impl Record {
    /// Returns the tagged identifier of this record.
    #[must_use]
    pub fn id(&self) -> RecordId {
        match self {
            Self::Task(bundle) => RecordId::Task(bundle.task().id()),
            Self::Subtask(subtask) => RecordId::Subtask(subtask.id()),
        }
    }
}
