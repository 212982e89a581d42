//! Universal error handling for the API

use aide::OperationOutput;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use schemars::JsonSchema;
use serde::Serialize;

use crate::todos::TodoServiceError;

/// API error response body
///
/// The shape is a fixed contract with the client: a single `error` field
/// holding a human-readable message.
#[derive(Debug, Serialize, JsonSchema)]
pub struct ApiErrorResponse {
    /// Human-readable error message
    pub error: &'static str,
}

/// Application error type that wraps the API error response
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    inner: ApiErrorResponse,
}

impl AppError {
    /// Create a new application error
    #[must_use]
    pub const fn new(status: StatusCode, message: &'static str) -> Self {
        Self {
            status,
            inner: ApiErrorResponse { error: message },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the error based on status code
        match self.status.as_u16() {
            400..=499 => tracing::warn!("Client error: {}", self.inner.error),
            500..=599 => tracing::error!("Server error: {}", self.inner.error),
            _ => {}
        }

        (self.status, Json(self.inner)).into_response()
    }
}

/// Convert todo service errors to application errors
impl From<TodoServiceError> for AppError {
    fn from(err: TodoServiceError) -> Self {
        match &err {
            TodoServiceError::NotFound => {
                Self::new(StatusCode::NOT_FOUND, "TODO not found")
            }
            TodoServiceError::Storage(e) => {
                tracing::error!("Todo storage error: {e}");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
            TodoServiceError::Attachment(e) => {
                tracing::error!("Attachment storage error: {e}");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

impl OperationOutput for AppError {
    type Inner = ApiErrorResponse;

    fn operation_response(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Option<aide::openapi::Response> {
        Json::<ApiErrorResponse>::operation_response(ctx, operation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404_with_fixed_body() {
        let err = AppError::from(TodoServiceError::NotFound);

        assert_eq!(err.status, StatusCode::NOT_FOUND);
        let body = serde_json::to_value(&err.inner).unwrap();
        assert_eq!(body, serde_json::json!({ "error": "TODO not found" }));
    }
}
