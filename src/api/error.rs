//! Mapping of service failures onto HTTP responses.

use super::dto::ErrorResponse;
use crate::task::services::TaskBoardError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Errors surfaced by API handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The addressed record, kind or identifier does not exist.
    #[error("not found")]
    NotFound,
    /// Any failure the caller cannot act on.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Returns the HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<TaskBoardError> for ApiError {
    fn from(err: TaskBoardError) -> Self {
        match err {
            TaskBoardError::NotFound(_) => Self::NotFound,
            TaskBoardError::Store(store_err) => Self::Internal(store_err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            Self::NotFound => "Not found",
            Self::Internal(detail) => {
                tracing::error!(error = %detail, "request failed");
                "Internal server error"
            }
        };
        let body = ErrorResponse {
            error: message.to_owned(),
        };
        (self.status(), Json(body)).into_response()
    }
}
