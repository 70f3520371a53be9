use crate::error::{ApiError, ErrorResponse};
use crate::handlers::parse_item_id;
use crate::models::Item;
use crate::routes;
use crate::state::AppState;
use axum::{Json, extract::Path, extract::State, http::StatusCode};

/// GET /items/{id} handler - Retrieve one item by id
#[utoipa::path(
    get,
    path = routes::ITEM,
    params(
        ("id" = u64, Path, description = "Server-assigned item id")
    ),
    responses(
        (status = 200, description = "Item found", body = Item),
        (status = 404, description = "Item not found", body = ErrorResponse),
        (status = 500, description = "Storage error", body = ErrorResponse)
    ),
    tag = "items"
)]
pub async fn get_handler(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<(StatusCode, Json<Item>), ApiError> {
    let Some(id) = parse_item_id(&id_str) else {
        tracing::debug!("non-numeric item id in path: {}", id_str);
        return Err(ApiError::ItemNotFound);
    };

    match state.store.get(id).await? {
        Some(item) => {
            tracing::debug!("retrieved item {}", id);
            Ok((StatusCode::OK, Json(item)))
        }
        None => Err(ApiError::ItemNotFound),
    }
}
