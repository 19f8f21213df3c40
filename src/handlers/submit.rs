use crate::core::error::SubmitError;
use crate::core::state::AppState;
use crate::models::registration::{NewRegistration, SavedResponse, SubmitRequest, SAVED_MESSAGE};
use crate::security::csrf::CSRF_HEADER;
use crate::utils::time::current_timestamp;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Form submission handler
///
/// POST /submit-form
///
/// # Flow
/// 1. Check the `X-CSRF-TOKEN` header against issued tokens (419 on mismatch)
/// 2. Parse the JSON body (400 when it is not an object of strings)
/// 3. Trim name and email, run every rule of the rule table (422 with the error bag)
/// 4. Hash the password on a blocking thread
/// 5. Insert one row and answer `{"status": true, "message": ...}`
#[instrument(skip_all)]
pub async fn submit_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<SubmitRequest>, JsonRejection>,
) -> Result<Response, SubmitError> {
    state.metrics.increment_submissions();

    let token = headers
        .get(CSRF_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if !state.csrf.verify(token, current_timestamp()) {
        warn!(token_present = !token.is_empty(), "Rejected submission: CSRF token mismatch");
        state.metrics.increment_csrf_rejections();
        return Err(SubmitError::CsrfMismatch);
    }

    let Json(request) = payload.map_err(|rejection| {
        debug!(error = %rejection.body_text(), "Rejected submission: malformed body");
        state.metrics.increment_malformed();
        SubmitError::MalformedBody(rejection.body_text())
    })?;

    let input = request.normalized();

    if let Err(errors) = state.rules.validate(&input) {
        // Expected outcome of user input, not a fault
        debug!(fields = ?errors.field_names(), "Submission failed validation");
        state.metrics.increment_validation_failures();
        return Err(SubmitError::Validation(errors));
    }

    // Required rules passed, so every field is present
    let name = input.name.unwrap_or_default();
    let email = input.email.unwrap_or_default();
    let password = input.password.unwrap_or_default();

    let hasher = Arc::clone(&state.hasher);
    let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
        .await
        .map_err(|e| anyhow::Error::new(e).context("Hashing task failed"))
        .and_then(|result| result)
        .map_err(|e| {
            error!(error = %e, "Failed to hash password");
            state.metrics.increment_server_errors();
            SubmitError::Hashing(e)
        })?;

    let record = state
        .store
        .create(NewRegistration {
            name,
            email,
            password_hash,
        })
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to persist registration");
            state.metrics.increment_server_errors();
            SubmitError::Persistence(e)
        })?;

    state.metrics.increment_saved();

    info!(registration_id = record.id, "User registration saved");

    Ok((
        StatusCode::OK,
        Json(SavedResponse {
            status: true,
            message: SAVED_MESSAGE.to_string(),
        }),
    )
        .into_response())
}
