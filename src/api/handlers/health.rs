//! Health check endpoint handler.

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};

use crate::api::dto::{HealthResponse, HealthStatus};
use crate::state::AppState;

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// GET /health
///
/// Reports `healthy` with the number of stored flats, or `503` with
/// `unhealthy` when the store cannot be queried.
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let (status_code, status, flats) = match state.flats.count().await {
        Ok(count) => (StatusCode::OK, HealthStatus::Healthy, Some(count)),
        Err(e) => {
            tracing::error!(error = %e, "Health check could not reach the flat store");
            (StatusCode::SERVICE_UNAVAILABLE, HealthStatus::Unhealthy, None)
        }
    };

    let body = HealthResponse {
        status,
        version: state.version.clone(),
        timestamp: jiff::Timestamp::now().to_string(),
        flats,
    };
    (status_code, Json(body))
}
