use crate::error::{ApiError, ErrorResponse};
use crate::models::{Item, ItemDraft};
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::{Json, extract::State, http::StatusCode};
use serde_json::Value as JsonValue;

/// POST /items handler - Create an item
///
/// The body must be a JSON object with non-empty string `name` and
/// `description`; any further fields are stored verbatim. The server assigns
/// `id` and ignores one supplied by the caller.
#[utoipa::path(
    post,
    path = "/items",
    request_body = serde_json::Value,
    responses(
        (status = 201, description = "Item created", body = Item),
        (status = 400, description = "Invalid JSON or missing required fields", body = ErrorResponse),
        (status = 500, description = "Storage error", body = ErrorResponse)
    ),
    tag = "items"
)]
pub async fn create_handler(
    State(state): State<AppState>,
    payload: Result<Json<JsonValue>, JsonRejection>,
) -> Result<(StatusCode, Json<Item>), ApiError> {
    let Json(payload) = payload.map_err(|rejection| ApiError::InvalidJson(rejection.body_text()))?;
    let draft = ItemDraft::from_value(&payload).ok_or(ApiError::MissingFields)?;

    let item = state.store.create(draft).await?;

    tracing::info!("created item {}", item.id);
    Ok((StatusCode::CREATED, Json(item)))
}
