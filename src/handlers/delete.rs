use crate::error::{ApiError, ErrorResponse};
use crate::handlers::parse_item_id;
use crate::models::MessageResponse;
use crate::routes;
use crate::state::AppState;
use axum::{Json, extract::Path, extract::State, http::StatusCode};

/// DELETE /items/{id} handler - Remove one item by id
#[utoipa::path(
    delete,
    path = routes::ITEM,
    params(
        ("id" = u64, Path, description = "Server-assigned item id")
    ),
    responses(
        (status = 200, description = "Item deleted", body = MessageResponse),
        (status = 404, description = "Item not found", body = ErrorResponse),
        (status = 500, description = "Storage error", body = ErrorResponse)
    ),
    tag = "items"
)]
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let Some(id) = parse_item_id(&id_str) else {
        tracing::debug!("non-numeric item id in path: {}", id_str);
        return Err(ApiError::ItemNotFound);
    };

    if !state.store.delete(id).await? {
        return Err(ApiError::ItemNotFound);
    }

    tracing::info!("deleted item {}", id);
    Ok((
        StatusCode::OK,
        Json(MessageResponse {
            message: "Item deleted successfully.".to_string(),
        }),
    ))
}
