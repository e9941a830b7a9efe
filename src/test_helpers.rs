use std::sync::Arc;

use axum::Router;

use crate::{config::AppConfig, db::connection, routes::app, state::AppState};

/// State backed by a fresh in-memory SQLite database with the schema synced.
pub async fn test_state(config: AppConfig) -> anyhow::Result<Arc<AppState>> {
    let db = connection::connect(&config.database).await?;
    Ok(AppState::new(config, db))
}

pub async fn test_app() -> anyhow::Result<(Arc<AppState>, Router)> {
    let state = test_state(AppConfig::default()).await?;
    Ok((Arc::clone(&state), app(state)))
}
