use crate::error::{ApiError, ErrorResponse};
use crate::models::Item;
use crate::state::AppState;
use axum::{Json, extract::State, http::StatusCode};

/// GET /items handler - List all stored items
#[utoipa::path(
    get,
    path = "/items",
    responses(
        (status = 200, description = "All stored items", body = Vec<Item>),
        (status = 500, description = "Storage error", body = ErrorResponse)
    ),
    tag = "items"
)]
pub async fn list_handler(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Vec<Item>>), ApiError> {
    let items = state.store.list().await?;

    tracing::debug!("listing {} items", items.len());
    Ok((StatusCode::OK, Json(items)))
}
