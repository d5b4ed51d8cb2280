//! Task and subtask tracking for the task board.
//!
//! Tasks carry a title, a deadline and a completion flag, and exclusively own
//! their subtasks: deleting a task deletes its subtasks with it. Updates and
//! deletes are addressed by [`domain::RecordId`], which tags the identifier
//! with the kind of record it targets. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
