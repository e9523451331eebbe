//! Flat viewing reservation handlers.
//!
//! Thin adapters between HTTP and the booking service: extract the path and
//! body, call the service, serialize the result.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, patch, post},
};

use crate::api::dto::{ReservationResponse, ReserveRequest};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::ApiJson;

/// Creates flat-related routes.
///
/// Routes:
/// - POST  /{flat_id}/reserve
/// - PATCH /{flat_id}/cancel/{reservation_id}
/// - PATCH /{flat_id}/approve/{reservation_id}
/// - PATCH /{flat_id}/reject/{reservation_id}
/// - GET   /{flat_id}/view
pub fn flat_routes() -> Router<AppState> {
    Router::new()
        .route("/{flat_id}/reserve", post(reserve))
        .route("/{flat_id}/cancel/{reservation_id}", patch(cancel))
        .route("/{flat_id}/approve/{reservation_id}", patch(approve))
        .route("/{flat_id}/reject/{reservation_id}", patch(reject))
        .route("/{flat_id}/view", get(view))
}

/// POST /v1/flat/{flat_id}/reserve - Request a viewing slot
async fn reserve(
    State(state): State<AppState>,
    Path(flat_id): Path<String>,
    ApiJson(payload): ApiJson<ReserveRequest>,
) -> Result<Json<ReservationResponse>, AppError> {
    let id = state
        .services
        .booking
        .reserve(&flat_id, payload.into())
        .await?;
    Ok(Json(id.into()))
}

/// PATCH /v1/flat/{flat_id}/cancel/{reservation_id}
async fn cancel(
    State(state): State<AppState>,
    Path((flat_id, reservation_id)): Path<(String, String)>,
) -> Result<Json<ReservationResponse>, AppError> {
    let id = state
        .services
        .booking
        .cancel(&flat_id, &reservation_id)
        .await?;
    Ok(Json(id.into()))
}

/// PATCH /v1/flat/{flat_id}/approve/{reservation_id}
async fn approve(
    State(state): State<AppState>,
    Path((flat_id, reservation_id)): Path<(String, String)>,
) -> Result<Json<ReservationResponse>, AppError> {
    let id = state
        .services
        .booking
        .approve(&flat_id, &reservation_id)
        .await?;
    Ok(Json(id.into()))
}

/// PATCH /v1/flat/{flat_id}/reject/{reservation_id}
async fn reject(
    State(state): State<AppState>,
    Path((flat_id, reservation_id)): Path<(String, String)>,
) -> Result<Json<ReservationResponse>, AppError> {
    let id = state
        .services
        .booking
        .reject(&flat_id, &reservation_id)
        .await?;
    Ok(Json(id.into()))
}

/// GET /v1/flat/{flat_id}/view - Occupied timestamps in request order
async fn view(
    State(state): State<AppState>,
    Path(flat_id): Path<String>,
) -> Result<Json<Vec<String>>, AppError> {
    let dates = state
        .services
        .booking
        .view_occupied_dates(&flat_id)
        .await?;
    Ok(Json(dates))
}
