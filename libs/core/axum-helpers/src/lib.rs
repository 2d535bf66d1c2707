//! # Axum Helpers
//!
//! Utilities and middleware shared by the Axum services in this workspace.
//!
//! ## Modules
//!
//! - **[`server`]**: Router setup, graceful shutdown with cleanup
//! - **[`http`]**: HTTP middleware (CORS, security headers)
//! - **[`errors`]**: Structured JSON error responses
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use std::time::Duration;
//!
//! use axum_helpers::server::{create_production_app, create_router};
//! use core_config::server::{CorsConfig, ServerConfig};
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let routes = Router::new(); // Add your routes
//!     let router = create_router::<ApiDoc>(routes, &CorsConfig::default())?;
//!
//!     create_production_app(router, &ServerConfig::default(), Duration::from_secs(30), async {})
//!         .await?;
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod http;
pub mod server;

// Re-export server types
pub use server::{
    OPENAPI_PATH, ShutdownCoordinator, create_production_app, create_router,
    serve_with_cleanup,
};

// Re-export HTTP middleware
pub use http::{create_cors_layer, security_headers};

// Re-export error types
pub use errors::{AppError, ErrorResponse};
