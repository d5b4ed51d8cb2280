//! Partial field updates for tasks and subtasks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Field overwrites applied by kind-generic updates.
///
/// Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordPatch {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement deadline.
    pub deadline: Option<DateTime<Utc>>,
    /// Replacement completion flag.
    pub completed: Option<bool>,
}

impl RecordPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the replacement title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the replacement deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Sets the replacement completion flag.
    #[must_use]
    pub const fn with_completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }
}
