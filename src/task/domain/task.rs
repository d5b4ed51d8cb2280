//! Task and subtask entities.

use super::{RecordPatch, StatusCategory, SubtaskId, TaskId};
use chrono::{DateTime, SubsecRound, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Sub-second digits kept on stored instants; `TIMESTAMPTZ` holds microseconds.
const STORED_SUBSEC_DIGITS: u16 = 6;

fn at_storage_precision(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant.trunc_subsecs(STORED_SUBSEC_DIGITS)
}

/// Fields shared by tasks and subtasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct WorkItem {
    title: String,
    deadline: DateTime<Utc>,
    completed: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl WorkItem {
    fn new(title: String, deadline: DateTime<Utc>, clock: &impl Clock) -> Self {
        let timestamp = at_storage_precision(clock.utc());
        Self {
            title,
            deadline: at_storage_precision(deadline),
            completed: false,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Overwrites patched fields, touching `updated_at` only on change.
    fn apply(&mut self, patch: &RecordPatch, clock: &impl Clock) -> bool {
        let mut changed = false;
        if let Some(title) = patch.title.as_ref().filter(|title| **title != self.title) {
            self.title.clone_from(title);
            changed = true;
        }
        if let Some(deadline) = patch
            .deadline
            .map(at_storage_precision)
            .filter(|deadline| *deadline != self.deadline)
        {
            self.deadline = deadline;
            changed = true;
        }
        if let Some(completed) = patch.completed.filter(|completed| *completed != self.completed) {
            self.completed = completed;
            changed = true;
        }
        if changed {
            self.updated_at = at_storage_precision(clock.utc());
        }
        changed
    }
}

/// Top-level work item owning zero or more subtasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    #[serde(flatten)]
    item: WorkItem,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted deadline.
    pub deadline: DateTime<Utc>,
    /// Persisted completion flag.
    pub completed: bool,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new, not yet completed task.
    #[must_use]
    pub fn new(title: impl Into<String>, deadline: DateTime<Utc>, clock: &impl Clock) -> Self {
        Self {
            id: TaskId::new(),
            item: WorkItem::new(title.into(), deadline, clock),
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            item: WorkItem {
                title: data.title,
                deadline: data.deadline,
                completed: data.completed,
                created_at: data.created_at,
                updated_at: data.updated_at,
            },
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.item.title
    }

    /// Returns the task deadline.
    #[must_use]
    pub const fn deadline(&self) -> DateTime<Utc> {
        self.item.deadline
    }

    /// Returns whether the task is marked completed.
    #[must_use]
    pub const fn completed(&self) -> bool {
        self.item.completed
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.item.created_at
    }

    /// Returns the last update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.item.updated_at
    }

    /// Classifies the task relative to `now`.
    #[must_use]
    pub fn status_at(&self, now: DateTime<Utc>) -> StatusCategory {
        StatusCategory::classify(self.item.completed, self.item.deadline, now)
    }

    /// Applies a field patch. Returns `true` when any field changed.
    pub fn apply(&mut self, patch: &RecordPatch, clock: &impl Clock) -> bool {
        self.item.apply(patch, clock)
    }
}

/// Work item scoped to exactly one owning task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    id: SubtaskId,
    task_id: TaskId,
    #[serde(flatten)]
    item: WorkItem,
}

/// Parameter object for reconstructing a persisted subtask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedSubtaskData {
    /// Persisted subtask identifier.
    pub id: SubtaskId,
    /// Owning task identifier.
    pub task_id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted deadline.
    pub deadline: DateTime<Utc>,
    /// Persisted completion flag.
    pub completed: bool,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Subtask {
    /// Creates a new, not yet completed subtask under `task_id`.
    ///
    /// The parent is not checked here; the store rejects unknown parents.
    #[must_use]
    pub fn new(
        task_id: TaskId,
        title: impl Into<String>,
        deadline: DateTime<Utc>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: SubtaskId::new(),
            task_id,
            item: WorkItem::new(title.into(), deadline, clock),
        }
    }

    /// Reconstructs a subtask from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedSubtaskData) -> Self {
        Self {
            id: data.id,
            task_id: data.task_id,
            item: WorkItem {
                title: data.title,
                deadline: data.deadline,
                completed: data.completed,
                created_at: data.created_at,
                updated_at: data.updated_at,
            },
        }
    }

    /// Returns the subtask identifier.
    #[must_use]
    pub const fn id(&self) -> SubtaskId {
        self.id
    }

    /// Returns the owning task identifier.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the subtask title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.item.title
    }

    /// Returns the subtask deadline.
    #[must_use]
    pub const fn deadline(&self) -> DateTime<Utc> {
        self.item.deadline
    }

    /// Returns whether the subtask is marked completed.
    #[must_use]
    pub const fn completed(&self) -> bool {
        self.item.completed
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.item.created_at
    }

    /// Returns the last update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.item.updated_at
    }

    /// Classifies the subtask relative to `now`.
    #[must_use]
    pub fn status_at(&self, now: DateTime<Utc>) -> StatusCategory {
        StatusCategory::classify(self.item.completed, self.item.deadline, now)
    }

    /// Applies a field patch. Returns `true` when any field changed.
    pub fn apply(&mut self, patch: &RecordPatch, clock: &impl Clock) -> bool {
        self.item.apply(patch, clock)
    }
}
