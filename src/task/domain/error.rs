//! Error types for task domain parsing.

use thiserror::Error;

/// Error returned when a record kind token is not recognised.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown record kind: {0}")]
pub struct ParseRecordKindError(pub String);
