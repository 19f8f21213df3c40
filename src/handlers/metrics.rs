// Metrics endpoint

use crate::core::error::MonitoringError;
use crate::core::state::AppState;
use crate::utils::auth::verify_api_key;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, warn};

#[derive(Debug, Deserialize)]
pub struct MetricsQuery {
    #[serde(default)]
    pub api_key: String,
}

/// Returns JSON with submission counters, success rate, stored row count,
/// live CSRF tokens and uptime.
///
/// GET /metrics?api_key=<key>
///
/// Requires the configured admin API key; always 401 when none is configured.
pub async fn metrics_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MetricsQuery>,
) -> Result<Response, MonitoringError> {
    if !verify_api_key(&params.api_key, state.config.admin.api_key.as_deref()) {
        warn!("Unauthorized metrics access attempt");
        return Err(MonitoringError::InvalidApiKey);
    }

    let stored = state.store.count().await.map_err(|e| {
        error!(error = %e, "Failed to count registrations for metrics");
        MonitoringError::InternalError(e.to_string())
    })?;

    let snapshot = state.metrics.get_snapshot(stored, state.csrf.len());

    Ok((StatusCode::OK, Json(snapshot)).into_response())
}
