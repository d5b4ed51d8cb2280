//! Router assembly and server loop.

use super::handlers;
use crate::task::{ports::TaskStore, services::TaskBoardService};
use axum::{
    Router,
    routing::{get, post},
};
use mockable::Clock;
use std::future::Future;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Builds the task board router around `service`.
///
/// Both `/tasks/{target}/...` routes share the first parameter name; the
/// literal `subtasks` segment takes precedence over `{id}`. Other methods on
/// the `subtasks` route answer 404 like any unresolvable record.
pub fn router<S, C>(service: TaskBoardService<S, C>) -> Router
where
    S: TaskStore + 'static,
    C: Clock + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/tasks",
            get(handlers::list_tasks::<S, C>).post(handlers::create_task::<S, C>),
        )
        .route(
            "/tasks/{target}/subtasks",
            post(handlers::create_subtask::<S, C>).fallback(handlers::unknown_record),
        )
        .route(
            "/tasks/{target}/{id}",
            get(handlers::get_record::<S, C>)
                .put(handlers::update_record::<S, C>)
                .delete(handlers::delete_record::<S, C>),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

/// Serves the task board on `listener` until `shutdown` resolves.
///
/// # Errors
///
/// Returns an error when accepting connections fails.
pub async fn serve<S, C, F>(
    listener: TcpListener,
    service: TaskBoardService<S, C>,
    shutdown: F,
) -> std::io::Result<()>
where
    S: TaskStore + 'static,
    C: Clock + Send + Sync + 'static,
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown)
        .await
}
