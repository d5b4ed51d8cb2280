//! JSON request and response bodies for the task board API.
//!
//! Field names are camelCase on the wire (`createdAt`, `taskId`, ...).

use crate::task::domain::{
    Record, RecordPatch, StatusCategory, Subtask, Task, TaskWithSubtasks,
};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Body of `POST /tasks` and `POST /tasks/{taskId}/subtasks`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateRecordBody {
    /// Record title. May be empty.
    pub title: String,
    /// Record deadline.
    #[serde(deserialize_with = "deserialize_deadline")]
    pub deadline: DateTime<Utc>,
}

/// Body of `PUT /tasks/{type}/{id}`. Absent or `null` fields are untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PatchBody {
    /// Replacement title.
    #[serde(default)]
    pub title: Option<String>,
    /// Replacement deadline.
    #[serde(default, deserialize_with = "deserialize_optional_deadline")]
    pub deadline: Option<DateTime<Utc>>,
    /// Replacement completion flag.
    #[serde(default)]
    pub completed: Option<bool>,
}

impl From<PatchBody> for RecordPatch {
    fn from(body: PatchBody) -> Self {
        Self {
            title: body.title,
            deadline: body.deadline,
            completed: body.completed,
        }
    }
}

/// Serialized subtask.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubtaskResponse {
    /// Subtask identifier.
    pub id: Uuid,
    /// Owning task identifier.
    pub task_id: Uuid,
    /// Subtask title.
    pub title: String,
    /// Subtask deadline.
    pub deadline: DateTime<Utc>,
    /// Completion flag.
    pub completed: bool,
    /// Status category at response time.
    pub status: StatusCategory,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl SubtaskResponse {
    /// Serializes a subtask, classifying it relative to `now`.
    #[must_use]
    pub fn from_subtask(subtask: &Subtask, now: DateTime<Utc>) -> Self {
        Self {
            id: subtask.id().into_inner(),
            task_id: subtask.task_id().into_inner(),
            title: subtask.title().to_owned(),
            deadline: subtask.deadline(),
            completed: subtask.completed(),
            status: subtask.status_at(now),
            created_at: subtask.created_at(),
            updated_at: subtask.updated_at(),
        }
    }
}

/// Serialized task, always carrying its `subtasks` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    /// Task identifier.
    pub id: Uuid,
    /// Task title.
    pub title: String,
    /// Task deadline.
    pub deadline: DateTime<Utc>,
    /// Completion flag.
    pub completed: bool,
    /// Status category at response time.
    pub status: StatusCategory,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Owned subtasks.
    pub subtasks: Vec<SubtaskResponse>,
}

impl TaskResponse {
    /// Serializes a task and its subtasks, classifying both relative to `now`.
    #[must_use]
    pub fn from_bundle(bundle: &TaskWithSubtasks, now: DateTime<Utc>) -> Self {
        let mut response = Self::from_task(bundle.task(), now);
        response.subtasks = bundle
            .subtasks()
            .iter()
            .map(|subtask| SubtaskResponse::from_subtask(subtask, now))
            .collect();
        response
    }

    /// Serializes a task with an empty `subtasks` array.
    #[must_use]
    pub fn from_task(task: &Task, now: DateTime<Utc>) -> Self {
        Self {
            id: task.id().into_inner(),
            title: task.title().to_owned(),
            deadline: task.deadline(),
            completed: task.completed(),
            status: task.status_at(now),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
            subtasks: Vec::new(),
        }
    }
}

/// Serialized task or subtask returned by kind-generic routes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RecordResponse {
    /// A task with its subtasks.
    Task(TaskResponse),
    /// A subtask.
    Subtask(SubtaskResponse),
}

impl RecordResponse {
    /// Serializes a record, classifying it relative to `now`.
    #[must_use]
    pub fn from_record(record: &Record, now: DateTime<Utc>) -> Self {
        match record {
            Record::Task(bundle) => Self::Task(TaskResponse::from_bundle(bundle, now)),
            Record::Subtask(subtask) => Self::Subtask(SubtaskResponse::from_subtask(subtask, now)),
        }
    }
}

/// Acknowledgement body returned by deletes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable outcome.
    pub message: String,
}

/// Error body returned for failed requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error.
    pub error: String,
}

/// Parses a deadline as RFC 3339, or as a naive `YYYY-MM-DDTHH:MM[:SS]`
/// timestamp in UTC as sent by `datetime-local` form inputs.
///
/// # Errors
///
/// Returns the naive-format parse error when neither form matches.
pub fn parse_deadline(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    let trimmed = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f"))
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M"))
        .map(|naive| naive.and_utc())
}

fn deserialize_deadline<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_deadline(&raw)
        .map_err(|err| serde::de::Error::custom(format!("invalid deadline '{raw}': {err}")))
}

fn deserialize_optional_deadline<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|raw| {
            parse_deadline(&raw).map_err(|err| {
                serde::de::Error::custom(format!("invalid deadline '{raw}': {err}"))
            })
        })
        .transpose()
}
