use crate::core::state::AppState;
use crate::utils::time::current_timestamp;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;

#[derive(Debug, Serialize, serde::Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
    pub timestamp: i64,
}

/// Health check handler
///
/// GET /health
///
/// 503 when the database does not answer.
pub async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let (status, database) = match state.store.ping().await {
        Ok(()) => (StatusCode::OK, "ok"),
        Err(e) => {
            warn!(error = %e, "Health check: database unavailable");
            (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
        }
    };

    (
        status,
        Json(HealthResponse {
            status: if status == StatusCode::OK { "ok" } else { "degraded" }.to_string(),
            database: database.to_string(),
            timestamp: current_timestamp(),
        }),
    )
}
