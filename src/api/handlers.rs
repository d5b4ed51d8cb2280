//! Request handlers for the task board routes.

use super::{
    ApiError,
    dto::{
        CreateRecordBody, MessageResponse, PatchBody, RecordResponse, SubtaskResponse,
        TaskResponse,
    },
};
use crate::task::{
    domain::{RecordId, RecordKind, TaskId},
    ports::TaskStore,
    services::{CreateSubtaskRequest, CreateTaskRequest, TaskBoardService},
};
use axum::{
    Json,
    extract::{Path, State},
};
use mockable::Clock;
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// Reports liveness and the crate version.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `GET /tasks`
pub async fn list_tasks<S, C>(
    State(service): State<TaskBoardService<S, C>>,
) -> Result<Json<Vec<TaskResponse>>, ApiError>
where
    S: TaskStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    let tasks = service.list_tasks().await?;
    let now = service.now();
    debug!(count = tasks.len(), "listed tasks");
    Ok(Json(
        tasks
            .iter()
            .map(|bundle| TaskResponse::from_bundle(bundle, now))
            .collect(),
    ))
}

/// `POST /tasks`
pub async fn create_task<S, C>(
    State(service): State<TaskBoardService<S, C>>,
    Json(body): Json<CreateRecordBody>,
) -> Result<Json<TaskResponse>, ApiError>
where
    S: TaskStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    let task = service
        .create_task(CreateTaskRequest::new(body.title, body.deadline))
        .await?;
    info!(task_id = %task.id(), "created task");
    Ok(Json(TaskResponse::from_task(&task, service.now())))
}

/// `POST /tasks/{taskId}/subtasks`
pub async fn create_subtask<S, C>(
    State(service): State<TaskBoardService<S, C>>,
    Path(task_id): Path<String>,
    Json(body): Json<CreateRecordBody>,
) -> Result<Json<SubtaskResponse>, ApiError>
where
    S: TaskStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    let task_id = TaskId::from_uuid(parse_uuid(&task_id)?);
    let subtask = service
        .create_subtask(task_id, CreateSubtaskRequest::new(body.title, body.deadline))
        .await?;
    info!(task_id = %task_id, subtask_id = %subtask.id(), "created subtask");
    Ok(Json(SubtaskResponse::from_subtask(&subtask, service.now())))
}

/// `GET /tasks/{type}/{id}`
pub async fn get_record<S, C>(
    State(service): State<TaskBoardService<S, C>>,
    Path((kind, id)): Path<(String, String)>,
) -> Result<Json<RecordResponse>, ApiError>
where
    S: TaskStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    let record = service.get(record_id(&kind, &id)?).await?;
    Ok(Json(RecordResponse::from_record(&record, service.now())))
}

/// `PUT /tasks/{type}/{id}`
pub async fn update_record<S, C>(
    State(service): State<TaskBoardService<S, C>>,
    Path((kind, id)): Path<(String, String)>,
    Json(body): Json<PatchBody>,
) -> Result<Json<RecordResponse>, ApiError>
where
    S: TaskStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    let target = record_id(&kind, &id)?;
    let record = service.update(target, body.into()).await?;
    info!(record = %record.id(), "updated record");
    Ok(Json(RecordResponse::from_record(&record, service.now())))
}

/// `DELETE /tasks/{type}/{id}`
pub async fn delete_record<S, C>(
    State(service): State<TaskBoardService<S, C>>,
    Path((kind, id)): Path<(String, String)>,
) -> Result<Json<MessageResponse>, ApiError>
where
    S: TaskStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    let target = record_id(&kind, &id)?;
    service.delete(target).await?;
    info!(record = %target, "deleted record");
    Ok(Json(MessageResponse {
        message: "Deleted".to_owned(),
    }))
}

/// Answers methods the subtask collection route does not serve.
///
/// `subtasks` is never a record identifier, so these requests name nothing.
pub async fn unknown_record() -> ApiError {
    ApiError::NotFound
}

/// Resolves path segments into a tagged identifier.
///
/// Unknown kinds and malformed identifiers cannot address a stored record,
/// so both are reported as not found.
fn record_id(kind: &str, id: &str) -> Result<RecordId, ApiError> {
    let kind = RecordKind::try_from(kind).map_err(|err| {
        debug!(error = %err, "rejecting record kind");
        ApiError::NotFound
    })?;
    Ok(kind.with_uuid(parse_uuid(id)?))
}

fn parse_uuid(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|err| {
        debug!(error = %err, id = raw, "rejecting record identifier");
        ApiError::NotFound
    })
}
