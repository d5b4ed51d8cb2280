//! HTTP/JSON interface to the task board.
//!
//! | Method | Path | Purpose |
//! |---|---|---|
//! | GET | `/tasks` | List tasks with their subtasks |
//! | POST | `/tasks` | Create a task |
//! | POST | `/tasks/{taskId}/subtasks` | Create a subtask |
//! | GET | `/tasks/{type}/{id}` | Fetch a task or subtask |
//! | PUT | `/tasks/{type}/{id}` | Patch a task or subtask |
//! | DELETE | `/tasks/{type}/{id}` | Delete a task (with subtasks) or subtask |
//! | GET | `/health` | Liveness check |
//!
//! `{type}` is `task` or `subtask`.

pub mod dto;
mod error;
mod handlers;
mod routes;

pub use error::ApiError;
pub use routes::{router, serve};
