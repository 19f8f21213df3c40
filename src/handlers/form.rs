use crate::core::state::AppState;
use crate::utils::time::current_timestamp;
use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse, Redirect},
};
use std::sync::Arc;
use tracing::debug;

const PAGE_TEMPLATE: &str = include_str!("../../assets/user-form.html");
const APP_SCRIPT: &str = include_str!("../../assets/app.js");
const TOKEN_PLACEHOLDER: &str = "{{ csrf_token }}";

/// GET /
pub async fn index_handler() -> Redirect {
    Redirect::to("/user-form")
}

/// Registration form page
///
/// GET /user-form
///
/// Every render issues a fresh CSRF token and embeds it in the
/// `csrf-token` meta tag for the page script to echo back.
pub async fn form_page_handler(State(state): State<Arc<AppState>>) -> Html<String> {
    let token = state.csrf.issue(current_timestamp());
    state.metrics.increment_pages();

    debug!(active_tokens = state.csrf.len(), "Serving registration form");

    Html(render_form_page(&token))
}

/// Tokens are hex, so they can be spliced into the attribute as-is
pub fn render_form_page(csrf_token: &str) -> String {
    PAGE_TEMPLATE.replace(TOKEN_PLACEHOLDER, csrf_token)
}

/// GET /js/app.js
pub async fn app_script_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        APP_SCRIPT,
    )
}
