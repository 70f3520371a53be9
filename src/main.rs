mod api_doc;
mod config;
mod error;
mod handlers;
mod models;
mod routes;
mod state;
mod storage;
mod store;

use anyhow::Context;
use std::sync::Arc;

use config::Config;
use state::AppState;
use storage::JsonFileStorage;
use store::ItemStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    tracing::info!("item-store starting");

    let config = Config::from_env()?;
    config.log_startup();

    let storage = JsonFileStorage::new(config.data_path.clone());
    let state = AppState {
        store: ItemStore::new(Arc::new(storage)),
        config: Arc::new(config),
    };

    let addr = format!(
        "{}:{}",
        state.config.service_host, state.config.service_port
    );
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    tracing::info!("Server is running and listening on http://{}", addr);

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
