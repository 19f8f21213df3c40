// Centralized error handling for the form service

use crate::models::registration::{ErrorResponse, RejectedResponse};
use crate::validation::error_bag::ErrorBag;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;

/// Errors a form submission can end with
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("The given data was invalid")]
    Validation(ErrorBag),

    #[error("CSRF token mismatch.")]
    CsrfMismatch,

    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    #[error("Failed to persist registration: {0}")]
    Persistence(#[source] anyhow::Error),

    #[error("Failed to hash password: {0}")]
    Hashing(#[source] anyhow::Error),
}

/// Non-standard "Page Expired" status used for stale or missing tokens
pub fn page_expired_status() -> StatusCode {
    StatusCode::from_u16(419).unwrap_or(StatusCode::FORBIDDEN)
}

impl IntoResponse for SubmitError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            SubmitError::Validation(errors) => {
                return (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(RejectedResponse {
                        status: false,
                        errors,
                    }),
                )
                    .into_response();
            }
            SubmitError::CsrfMismatch => (page_expired_status(), "CSRF token mismatch."),
            SubmitError::MalformedBody(_) => (StatusCode::BAD_REQUEST, "Malformed request body"),
            // Internal details stay in the logs
            SubmitError::Persistence(_) | SubmitError::Hashing(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Server Error")
            }
        };

        (
            status,
            Json(ErrorResponse {
                status: false,
                message: message.to_string(),
            }),
        )
            .into_response()
    }
}

#[derive(Error, Debug)]
pub enum MonitoringError {
    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl IntoResponse for MonitoringError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            MonitoringError::InvalidApiKey => (StatusCode::UNAUTHORIZED, "Unauthorized"),
            MonitoringError::InternalError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
        };

        (status, message).into_response()
    }
}
