//! Taskboard: a task and subtask tracker with a REST backend.
//!
//! Tasks carry a title, a deadline and a completion flag and own their
//! subtasks. Each record's display status (completed, overdue, due soon or
//! normal) is derived from those fields when it is read.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory, `PostgreSQL`)
//!
//! # Modules
//!
//! - [`task`]: Task/subtask domain, store port, adapters and service
//! - [`api`]: HTTP/JSON routes over the task service
//! - [`config`]: Environment-driven server configuration
//! - [`telemetry`]: Tracing subscriber setup

pub mod api;
pub mod config;
pub mod task;
pub mod telemetry;
