//! Server infrastructure module.
//!
//! This module provides:
//! - Router setup with OpenAPI documentation and common middleware
//! - Graceful shutdown coordination with a bounded cleanup phase
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router};
//!
//! let router = create_router::<ApiDoc>(routes, &cors_config)?;
//! create_production_app(router, &server_config, Duration::from_secs(30), cleanup).await?;
//! ```

pub mod app;
pub mod shutdown;

pub use app::{
    OPENAPI_PATH, bind, create_production_app, create_router, serve_with_cleanup,
};
pub use shutdown::ShutdownCoordinator;
