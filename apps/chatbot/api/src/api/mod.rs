use std::sync::Arc;

use axum::{Router, routing::get};

use crate::container::ServiceContainer;

pub mod health;

/// Application routes, mounted at the root by `create_router`
pub fn routes(container: Arc<ServiceContainer>) -> Router {
    Router::new()
        .route("/", get(health::hello))
        .route("/ready", get(health::ready))
        .with_state(container)
}
