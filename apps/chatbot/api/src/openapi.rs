use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(crate::api::health::hello, crate::api::health::ready),
    components(schemas(
        axum_helpers::ErrorResponse,
        crate::api::health::MessageResponse,
        crate::api::health::ReadyResponse,
    )),
    info(
        title = "Chatbot API",
        version = "0.1.0",
        description = "Chatbot backend service"
    ),
    tags((name = "health", description = "Liveness and readiness"))
)]
pub struct ApiDoc;
