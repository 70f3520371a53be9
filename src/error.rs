use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// Error response type
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Response type for health check endpoint
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Response type for unhealthy status
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct UnhealthyResponse {
    pub status: String,
    pub error: String,
}

/// Custom error type for API endpoints
///
/// Maps each failure class to its HTTP status code and JSON error body.
/// Storage and JSON-parse details are logged, never exposed to the caller.
#[derive(Debug)]
pub enum ApiError {
    /// No stored item matches the requested id (including non-numeric ids)
    ItemNotFound,
    /// Request body is missing a non-empty `name` or `description`
    MissingFields,
    /// Request body could not be parsed as JSON
    InvalidJson(String),
    /// Storage read/write failure
    Storage(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::ItemNotFound => (StatusCode::NOT_FOUND, "Item not found.".to_string()),
            ApiError::MissingFields => (
                StatusCode::BAD_REQUEST,
                "Name and description are required.".to_string(),
            ),
            ApiError::InvalidJson(detail) => {
                tracing::debug!("rejected request body: {}", detail);
                (StatusCode::BAD_REQUEST, "Invalid JSON format.".to_string())
            }
            ApiError::Storage(err) => {
                tracing::error!("storage error: {:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status, body).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Storage(err)
    }
}
