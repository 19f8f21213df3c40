use crate::models::registration::ErrorResponse;
use axum::{
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Json, Response},
};

fn is_browser(headers: &HeaderMap) -> bool {
    let user_agent = headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    user_agent.contains("Mozilla")
        || user_agent.contains("Chrome")
        || user_agent.contains("Safari")
        || user_agent.contains("Firefox")
        || user_agent.contains("Edge")
}

pub async fn fallback_handler(headers: HeaderMap) -> Response {
    if is_browser(&headers) {
        let html = r#"<!DOCTYPE html><html><body><h1>404 | Not Found</h1><p><a href="/user-form">Register</a></p></body></html>"#;

        return (StatusCode::NOT_FOUND, Html(html)).into_response();
    }

    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            status: false,
            message: "Not Found".to_string(),
        }),
    )
        .into_response()
}
