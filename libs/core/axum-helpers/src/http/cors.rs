use std::io;

use axum::http::{HeaderValue, Method, header};
use core_config::server::CorsConfig;
use tower_http::cors::CorsLayer;

/// Creates the CORS layer for the configured origin.
///
/// Allows GET, POST, PUT, DELETE and OPTIONS with the `Content-Type` and
/// `Authorization` request headers.
///
/// # Errors
/// Returns `InvalidInput` when the origin is not a valid header value.
pub fn create_cors_layer(config: &CorsConfig) -> io::Result<CorsLayer> {
    let origin = config.origin.parse::<HeaderValue>().map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Invalid CORS_ORIGIN value: {}", e),
        )
    })?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]))
}
