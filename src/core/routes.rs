// HTTP routes configuration

use crate::core::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Form page and its script
        .route("/", get(crate::handlers::form::index_handler))
        .route("/user-form", get(crate::handlers::form::form_page_handler))
        .route("/js/app.js", get(crate::handlers::form::app_script_handler))

        // Submission (requires CSRF token header)
        .route("/submit-form", post(crate::handlers::submit::submit_handler))

        // Monitoring
        .route("/health", get(crate::handlers::health::health_handler))
        .route("/metrics", get(crate::handlers::metrics::metrics_handler))

        // 404 fallback for all unmatched routes
        .fallback(crate::handlers::fallback::fallback_handler)

        .with_state(state)
}
