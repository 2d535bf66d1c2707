use std::future::Future;
use std::io;
use std::time::Duration;

use axum::{Json, Router, middleware, routing::get};
use core_config::server::{CorsConfig, ServerConfig};
use tokio::net::TcpListener;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info, warn};
use utoipa::OpenApi;

use super::shutdown::ShutdownCoordinator;
use crate::errors::handlers::not_found;
use crate::http::{create_cors_layer, security_headers};

/// Path the OpenAPI document is served from
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// Bind the TCP listener for `server_config`
pub async fn bind(server_config: &ServerConfig) -> io::Result<TcpListener> {
    let listener = TcpListener::bind(server_config.address())
        .await
        .inspect_err(|e| tracing::error!("Failed to bind {}: {}", server_config.address(), e))?;
    info!("Server starting on {}", listener.local_addr()?);
    Ok(listener)
}

/// Combines application routes with the cross-cutting layers.
///
/// This sets up:
/// - the OpenAPI document at [`OPENAPI_PATH`]
/// - `routes` mounted at the root
/// - request tracing, security headers and CORS
/// - a JSON 404 fallback
///
/// # Errors
/// Returns `InvalidInput` when the CORS origin is not a valid header value.
///
/// # Example
/// ```ignore
/// use axum::{Router, routing::get};
/// use utoipa::OpenApi;
/// use axum_helpers::server::create_router;
///
/// #[derive(OpenApi)]
/// #[openapi(paths(/* your paths */))]
/// struct ApiDoc;
///
/// let routes = Router::new().route("/", get(handler)).with_state(state);
/// let router = create_router::<ApiDoc>(routes, &CorsConfig::from_env()?)?;
/// ```
pub fn create_router<T>(routes: Router, cors: &CorsConfig) -> io::Result<Router>
where
    T: OpenApi + 'static,
{
    let cors_layer = create_cors_layer(cors)?;
    info!("CORS configured with allowed origin: {}", cors.origin);

    let router = Router::new()
        .route(OPENAPI_PATH, get(|| async { Json(T::openapi()) }))
        .merge(routes)
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers))
        .layer(cors_layer);

    Ok(router)
}

/// Production server with coordinated shutdown and cleanup.
///
/// Binds `server_config`, serves until SIGINT/SIGTERM, then runs `cleanup`
/// for at most `shutdown_timeout`. Cleanup also runs when the server stops
/// because of an error.
///
/// # Example
/// ```ignore
/// let cleanup = async move { container.shutdown().await };
///
/// create_production_app(router, &config, Duration::from_secs(30), cleanup).await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = bind(server_config).await?;
    serve_with_cleanup(listener, router, shutdown_timeout, cleanup).await
}

/// Serve on an already bound listener; see [`create_production_app`]
pub async fn serve_with_cleanup<F>(
    listener: TcpListener,
    router: Router,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (coordinator, mut shutdown_rx) = ShutdownCoordinator::new();

    let cleanup_handle = tokio::spawn(async move {
        let _ = shutdown_rx.recv().await;

        info!("Starting cleanup tasks (timeout: {:?})", shutdown_timeout);
        match tokio::time::timeout(shutdown_timeout, cleanup).await {
            Ok(_) => info!("Cleanup completed successfully"),
            Err(_) => warn!(
                "Cleanup exceeded timeout of {:?}, forcing shutdown",
                shutdown_timeout
            ),
        }
    });

    let signal = coordinator.clone();
    let serve_result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move { signal.wait_for_signal().await })
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        });

    coordinator.shutdown();
    cleanup_handle.await.ok();

    serve_result
}
