use crate::error::{ApiError, ErrorResponse};
use crate::handlers::parse_item_id;
use crate::models::{Item, ItemDraft};
use crate::routes;
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::{Json, extract::Path, extract::State, http::StatusCode};
use serde_json::Value as JsonValue;

/// PUT /items/{id} handler - Update an item
///
/// Shallow merge: payload fields overwrite the stored item's fields, the
/// remaining stored fields survive. The existence check runs before field
/// validation, so an unknown id answers 404 even for an incomplete payload.
#[utoipa::path(
    put,
    path = routes::ITEM,
    params(
        ("id" = u64, Path, description = "Server-assigned item id")
    ),
    request_body = serde_json::Value,
    responses(
        (status = 200, description = "Merged item", body = Item),
        (status = 400, description = "Invalid JSON or missing required fields", body = ErrorResponse),
        (status = 404, description = "Item not found", body = ErrorResponse),
        (status = 500, description = "Storage error", body = ErrorResponse)
    ),
    tag = "items"
)]
pub async fn update_handler(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    payload: Result<Json<JsonValue>, JsonRejection>,
) -> Result<(StatusCode, Json<Item>), ApiError> {
    let Json(payload) = payload.map_err(|rejection| ApiError::InvalidJson(rejection.body_text()))?;

    let Some(id) = parse_item_id(&id_str) else {
        tracing::debug!("non-numeric item id in path: {}", id_str);
        return Err(ApiError::ItemNotFound);
    };

    if state.store.get(id).await?.is_none() {
        return Err(ApiError::ItemNotFound);
    }

    let draft = ItemDraft::from_value(&payload).ok_or(ApiError::MissingFields)?;

    // The item can disappear between the existence check and the merge; the
    // store reports that as None and the caller sees not-found.
    let merged = state
        .store
        .update(id, draft)
        .await?
        .ok_or(ApiError::ItemNotFound)?;

    tracing::info!("updated item {}", id);
    Ok((StatusCode::OK, Json(merged)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::storage::MemoryStorage;
    use crate::store::ItemStore;
    use axum::{Router, body::Body, http::Request, routing::put};
    use serde_json::json;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn setup_test_app() -> (Router, Arc<MemoryStorage>) {
        let items: Vec<Item> = serde_json::from_value(json!([
            { "id": 1, "name": "A", "description": "B", "extra": "X" }
        ]))
        .unwrap();

        let storage = Arc::new(MemoryStorage::with_items(items));
        let state = AppState {
            store: ItemStore::new(storage.clone()),
            config: Arc::new(Config {
                data_path: "items.json".into(),
                service_port: 3000,
                service_host: "0.0.0.0".to_string(),
            }),
        };

        let app = Router::new()
            .route(crate::routes::ITEM, put(update_handler))
            .with_state(state);
        (app, storage)
    }

    async fn put_body(app: Router, path: &str, body: &str) -> (StatusCode, Vec<u8>) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri(path)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn test_update_merges_and_preserves_extra() {
        let (app, storage) = setup_test_app();

        let (status, body) =
            put_body(app, "/items/1", r#"{"name":"A2","description":"B2"}"#).await;

        assert_eq!(status, StatusCode::OK);
        let merged: Item = serde_json::from_slice(&body).unwrap();
        assert_eq!(merged.id, 1);
        assert_eq!(merged.name, "A2");
        assert_eq!(merged.description, "B2");
        assert_eq!(merged.extra.get("extra"), Some(&json!("X")));
        assert_eq!(storage.snapshot(), vec![merged]);
    }

    #[tokio::test]
    async fn test_update_not_found() {
        let (app, storage) = setup_test_app();
        let before = storage.snapshot();

        let (status, body) =
            put_body(app, "/items/99", r#"{"name":"A2","description":"B2"}"#).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.error, "Item not found.");
        assert_eq!(storage.snapshot(), before);
    }

    #[tokio::test]
    async fn test_update_not_found_wins_over_missing_fields() {
        // Existence is checked before field validation.
        let (app, _storage) = setup_test_app();

        let (status, body) = put_body(app, "/items/99", r#"{"name":"only"}"#).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.error, "Item not found.");
    }

    #[tokio::test]
    async fn test_update_missing_fields() {
        let (app, storage) = setup_test_app();
        let before = storage.snapshot();

        let (status, body) = put_body(app, "/items/1", r#"{"name":"A2"}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.error, "Name and description are required.");
        assert_eq!(storage.snapshot(), before);
    }

    #[tokio::test]
    async fn test_update_invalid_json() {
        let (app, storage) = setup_test_app();
        let before = storage.snapshot();

        let (status, body) = put_body(app, "/items/1", "{broken").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.error, "Invalid JSON format.");
        assert_eq!(storage.snapshot(), before);
    }

    #[tokio::test]
    async fn test_update_cannot_reassign_id() {
        let (app, storage) = setup_test_app();

        let (status, body) = put_body(
            app,
            "/items/1",
            r#"{"id":42,"name":"A2","description":"B2"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let merged: Item = serde_json::from_slice(&body).unwrap();
        assert_eq!(merged.id, 1);
        assert_eq!(storage.snapshot()[0].id, 1);
    }

    #[tokio::test]
    async fn test_update_non_numeric_id() {
        let (app, _storage) = setup_test_app();

        let (status, body) =
            put_body(app, "/items/abc", r#"{"name":"A2","description":"B2"}"#).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.error, "Item not found.");
    }
}
