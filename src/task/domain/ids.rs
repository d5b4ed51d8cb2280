//! Identifier types for the task domain.

use super::ParseRecordKindError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a top-level task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Creates a new random task identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a task identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<Uuid> for TaskId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a subtask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubtaskId(Uuid);

impl SubtaskId {
    /// Creates a new random subtask identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a subtask identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for SubtaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<Uuid> for SubtaskId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for SubtaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Entity kind addressed by kind-generic operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// A top-level task.
    Task,
    /// A subtask owned by a task.
    Subtask,
}

impl RecordKind {
    /// Returns the canonical token used in request paths.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::Subtask => "subtask",
        }
    }

    /// Pairs this kind with a raw identifier.
    #[must_use]
    pub const fn with_uuid(self, uuid: Uuid) -> RecordId {
        match self {
            Self::Task => RecordId::Task(TaskId::from_uuid(uuid)),
            Self::Subtask => RecordId::Subtask(SubtaskId::from_uuid(uuid)),
        }
    }
}

impl TryFrom<&str> for RecordKind {
    type Error = ParseRecordKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "task" => Ok(Self::Task),
            "subtask" => Ok(Self::Subtask),
            _ => Err(ParseRecordKindError(value.to_owned())),
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier tagged with the kind of record it refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum RecordId {
    /// Identifies a task.
    Task(TaskId),
    /// Identifies a subtask.
    Subtask(SubtaskId),
}

impl RecordId {
    /// Returns the kind of record this identifier refers to.
    #[must_use]
    pub const fn kind(self) -> RecordKind {
        match self {
            Self::Task(_) => RecordKind::Task,
            Self::Subtask(_) => RecordKind::Subtask,
        }
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_uuid(self) -> Uuid {
        match self {
            Self::Task(id) => id.into_inner(),
            Self::Subtask(id) => id.into_inner(),
        }
    }
}

impl From<TaskId> for RecordId {
    fn from(id: TaskId) -> Self {
        Self::Task(id)
    }
}

impl From<SubtaskId> for RecordId {
    fn from(id: SubtaskId) -> Self {
        Self::Subtask(id)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind(), self.into_uuid())
    }
}
