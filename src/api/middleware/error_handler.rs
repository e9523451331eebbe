//! Error handler for converting AppError to HTTP responses.
//!
//! Every application error is reported as `400 Bad Request` with a
//! `{ "message": ... }` body carrying the error's display text. The global
//! middleware rewrites framework-generated errors (unknown route, wrong
//! method, timeouts) into the same body shape while keeping their status.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::api::dto::ErrorResponse;
use crate::error::AppError;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Internal { source } => {
                tracing::error!(kind = self.kind(), error = ?source, "Request failed");
            }
            AppError::Configuration { key, source } => {
                tracing::error!(kind = self.kind(), key = %key, error = ?source, "Request failed");
            }
            _ => {
                tracing::debug!(kind = self.kind(), message = %self, "Request refused");
            }
        }

        let body = ErrorResponse::new(self.to_string());
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest {
            message: rejection.body_text(),
        }
    }
}

/// Fallback message for framework errors that carry no body.
fn default_message(status: StatusCode) -> String {
    match status {
        StatusCode::NOT_FOUND => "The requested resource was not found".to_string(),
        StatusCode::METHOD_NOT_ALLOWED => "HTTP method not allowed for this endpoint".to_string(),
        StatusCode::REQUEST_TIMEOUT => "Request timeout".to_string(),
        StatusCode::UNSUPPORTED_MEDIA_TYPE => "Unsupported media type".to_string(),
        _ => status
            .canonical_reason()
            .unwrap_or("An unknown error occurred")
            .to_string(),
    }
}

/// Global error handling middleware that converts non-JSON error responses
/// into the standard `{ "message": ... }` body.
pub async fn global_error_handler(
    request: axum::extract::Request,
    next: axum::middleware::Next,
) -> Response {
    let response = next.run(request).await;
    let status = response.status();

    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }

    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("application/json"));
    if is_json {
        return response;
    }

    let (_parts, body) = response.into_parts();
    let body_bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_default();
    let original_message = String::from_utf8_lossy(&body_bytes).trim().to_string();

    let message = if original_message.is_empty() {
        default_message(status)
    } else {
        original_message
    };

    (status, Json(ErrorResponse::new(message))).into_response()
}
