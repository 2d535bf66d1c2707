use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum_helpers::server::{create_production_app, create_router};
use core_config::server::CorsConfig;
use eyre::WrapErr;
use tracing::info;

use crate::api;
use crate::config::Config;
use crate::container::ServiceContainer;
use crate::openapi::ApiDoc;

/// Budget for closing the pools once a shutdown signal arrives
pub const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

/// Check out one SERVICE_DB connection and hand it straight back
pub async fn verify_database(container: &ServiceContainer) -> eyre::Result<()> {
    let connection = container
        .service_db
        .connect()
        .await
        .wrap_err("Database connectivity check failed")?;
    drop(connection);

    info!("Database connected successfully");
    Ok(())
}

pub fn build_router(container: Arc<ServiceContainer>, cors: &CorsConfig) -> eyre::Result<Router> {
    let router = create_router::<ApiDoc>(api::routes(container), cors)?;
    Ok(router)
}

/// Load configuration, build the container and [`run`] it.
///
/// Every startup failure, configuration included, comes back through the
/// returned error.
pub async fn start() -> eyre::Result<()> {
    let config = Config::from_env()?;
    let container = Arc::new(ServiceContainer::from_env()?);
    run(config, container).await
}

/// Verify the database, then serve until SIGINT/SIGTERM.
///
/// Nothing is bound when the database check fails.
pub async fn run(config: Config, container: Arc<ServiceContainer>) -> eyre::Result<()> {
    verify_database(&container).await?;

    let router = build_router(Arc::clone(&container), &config.cors)?;

    info!(
        "Starting chatbot API with graceful shutdown ({:?} cleanup timeout)",
        SHUTDOWN_TIMEOUT
    );
    create_production_app(router, &config.server, SHUTDOWN_TIMEOUT, async move {
        container.shutdown().await;
    })
    .await
    .wrap_err("Server error")?;

    info!("Chatbot API shutdown complete");
    Ok(())
}
