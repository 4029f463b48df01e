//! Health check handlers

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::db::test_connection;
use crate::error::{AppError, AppResult};
use crate::keepalive::KeepAliveStatus;
use crate::state::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub environment: String,
    pub database: String,
    pub keepalive: Option<KeepAliveStatus>,
}

/// Health check endpoint
async fn health_check(State(state): State<AppState>) -> AppResult<Json<HealthResponse>> {
    test_connection(state.db()).await.map_err(|e| {
        tracing::warn!("Health check query failed: {}", e);
        AppError::Unavailable("database is unreachable".to_string())
    })?;

    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: state.config().environment.to_string(),
        database: "up".to_string(),
        keepalive: keepalive_snapshot(&state).await,
    }))
}

/// Keep-alive status endpoint, answered without touching the database
async fn keepalive_status(State(state): State<AppState>) -> Json<Option<KeepAliveStatus>> {
    Json(keepalive_snapshot(&state).await)
}

async fn keepalive_snapshot(state: &AppState) -> Option<KeepAliveStatus> {
    match state.keepalive() {
        Some(status) => Some(status.read().await.clone()),
        None => None,
    }
}

/// Health routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/keepalive", get(keepalive_status))
}
