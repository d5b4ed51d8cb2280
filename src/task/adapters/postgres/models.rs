//! Diesel row models for task board persistence.

use super::schema::{subtasks, tasks};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Task deadline.
    pub deadline: DateTime<Utc>,
    /// Completion flag.
    pub completed: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Task deadline.
    pub deadline: DateTime<Utc>,
    /// Completion flag.
    pub completed: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result row for subtask records.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = subtasks)]
#[diesel(belongs_to(TaskRow, foreign_key = task_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SubtaskRow {
    /// Subtask identifier.
    pub id: uuid::Uuid,
    /// Owning task identifier.
    pub task_id: uuid::Uuid,
    /// Subtask title.
    pub title: String,
    /// Subtask deadline.
    pub deadline: DateTime<Utc>,
    /// Completion flag.
    pub completed: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for subtask records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = subtasks)]
pub struct NewSubtaskRow {
    /// Subtask identifier.
    pub id: uuid::Uuid,
    /// Owning task identifier.
    pub task_id: uuid::Uuid,
    /// Subtask title.
    pub title: String,
    /// Subtask deadline.
    pub deadline: DateTime<Utc>,
    /// Completion flag.
    pub completed: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Mutable task columns.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
pub struct TaskChangeset {
    /// Replacement title.
    pub title: String,
    /// Replacement deadline.
    pub deadline: DateTime<Utc>,
    /// Replacement completion flag.
    pub completed: bool,
    /// Replacement update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Mutable subtask columns.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = subtasks)]
pub struct SubtaskChangeset {
    /// Replacement title.
    pub title: String,
    /// Replacement deadline.
    pub deadline: DateTime<Utc>,
    /// Replacement completion flag.
    pub completed: bool,
    /// Replacement update timestamp.
    pub updated_at: DateTime<Utc>,
}
