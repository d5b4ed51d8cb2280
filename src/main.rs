//! Taskboard HTTP server entry point.
//!
//! Reads configuration from the environment, opens the configured store and
//! serves the task board API until interrupted.

use std::sync::Arc;

use mockable::DefaultClock;
use taskboard::{
    api,
    config::{Config, StoreConfig},
    task::{
        adapters::{memory::InMemoryTaskStore, postgres::PostgresTaskStore},
        ports::TaskStore,
        services::TaskBoardService,
    },
    telemetry,
};
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    telemetry::init(config.log_format)?;

    let listener = TcpListener::bind(config.listen_addr()).await?;
    info!(addr = %config.listen_addr(), "task board listening");

    match &config.store {
        StoreConfig::InMemory => {
            warn!("DATABASE_URL is not set; tasks are kept in memory only");
            run(listener, InMemoryTaskStore::new()).await
        }
        StoreConfig::Postgres { url, pool_size } => {
            let store = PostgresTaskStore::connect(url, *pool_size)?;
            store.sync_schema().await?;
            info!(pool_size, "database schema synced");
            run(listener, store).await
        }
    }
}

async fn run<S>(listener: TcpListener, store: S) -> anyhow::Result<()>
where
    S: TaskStore + 'static,
{
    let service = TaskBoardService::new(Arc::new(store), Arc::new(DefaultClock));
    api::serve(listener, service, shutdown_signal()).await?;
    info!("task board stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
