//! Deadline-based status classification.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Hours before a deadline during which open work counts as due soon.
pub const DUE_SOON_WINDOW_HOURS: i64 = 24;

/// Display category derived from completion and deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusCategory {
    /// The work item is marked completed.
    Completed,
    /// The deadline has passed.
    Overdue,
    /// The deadline falls within the next 24 hours.
    DueSoon,
    /// The deadline is further away.
    Normal,
}

impl StatusCategory {
    /// Classifies a work item relative to `now`.
    ///
    /// Completion takes precedence over the deadline. A deadline exactly at
    /// `now` is due soon, not overdue.
    #[must_use]
    pub fn classify(completed: bool, deadline: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        if completed {
            return Self::Completed;
        }
        if deadline < now {
            return Self::Overdue;
        }
        if deadline - now <= TimeDelta::hours(DUE_SOON_WINDOW_HOURS) {
            return Self::DueSoon;
        }
        Self::Normal
    }
}
