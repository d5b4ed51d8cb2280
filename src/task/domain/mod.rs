//! Domain model for the task board.
//!
//! Tasks own subtasks; both carry a title, a deadline and a completion flag.
//! Status categories are derived from those fields at read time and are never
//! persisted. Infrastructure concerns stay outside this boundary.

mod error;
mod ids;
mod patch;
mod record;
mod status;
mod task;

pub use error::ParseRecordKindError;
pub use ids::{RecordId, RecordKind, SubtaskId, TaskId};
pub use patch::RecordPatch;
pub use record::{Record, TaskWithSubtasks};
pub use status::{DUE_SOON_WINDOW_HOURS, StatusCategory};
pub use task::{PersistedSubtaskData, PersistedTaskData, Subtask, Task};
