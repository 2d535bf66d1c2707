use std::sync::Arc;

use axum::{Json, extract::State};
use axum_helpers::AppError;
use database::postgres::check_health;
use serde::Serialize;
use utoipa::ToSchema;

use crate::container::ServiceContainer;

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReadyResponse {
    pub status: String,
}

#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses(
        (status = 200, description = "Service is up", body = MessageResponse)
    )
)]
pub async fn hello() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Hello World".to_string(),
    })
}

/// Readiness: the SERVICE_DB pool can run a query
#[utoipa::path(
    get,
    path = "/ready",
    tag = "health",
    responses(
        (status = 200, description = "Database reachable", body = ReadyResponse),
        (status = 500, description = "Database not configured", body = axum_helpers::ErrorResponse),
        (status = 503, description = "Database unreachable", body = axum_helpers::ErrorResponse)
    )
)]
pub async fn ready(
    State(container): State<Arc<ServiceContainer>>,
) -> Result<Json<ReadyResponse>, AppError> {
    let pool = container
        .service_db
        .pool()
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    check_health(&pool)
        .await
        .map_err(|e| AppError::ServiceUnavailable(e.to_string()))?;

    Ok(Json(ReadyResponse {
        status: "ready".to_string(),
    }))
}
