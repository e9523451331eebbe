//! Router configuration for the API.

use std::time::Duration;

use axum::{Router, http::StatusCode, middleware};
use tower_http::timeout::TimeoutLayer;

use crate::api::handlers;
use crate::api::middleware::{global_error_handler, logging_middleware, request_id_middleware};
use crate::state::AppState;

/// Creates the main application router with all routes and middleware.
///
/// # Middleware Order
/// Middleware is applied in reverse order of declaration (last added runs first):
/// 1. Request ID - generates or propagates `x-request-id`
/// 2. Logging - logs requests with their request ID
/// 3. Global error handler - gives framework errors a JSON body
/// 4. Timeout - answers `408` once `request_timeout` elapses
///
/// # Routes
/// - `/v1/flat` - reservation operations
/// - `/health` - health check
pub fn create_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .nest("/v1/flat", handlers::flats::flat_routes())
        .merge(handlers::health::health_routes())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(middleware::from_fn(global_error_handler))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}
