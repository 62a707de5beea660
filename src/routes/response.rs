//! Form submission route handlers

use crate::error::{validation_error, ApiResult};
use crate::models::{FormResponse, SubmitResponseRequest};
use crate::state::SharedState;
use axum::{
    extract::{Path, State},
    Json,
};
use tracing::{debug, info};
use validator::Validate;

/// Record a form submission.
///
/// The phone number is the only required field; response data is accepted
/// verbatim and the form id is not checked against existing forms.
pub async fn submit_response(
    State(state): State<SharedState>,
    Json(payload): Json<SubmitResponseRequest>,
) -> ApiResult<Json<FormResponse>> {
    // Reject before anything touches the database
    payload
        .validate()
        .map_err(|e| validation_error(e.to_string()))?;

    let response = state.responses.submit(&payload).await?;

    info!(
        "Response {} recorded for form {} (language: {})",
        response.id, response.form_id, response.language
    );
    Ok(Json(response))
}

/// List every response submitted against a form, newest first.
/// A form with no responses yields an empty list, not a 404.
pub async fn list_form_responses(
    State(state): State<SharedState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<Vec<FormResponse>>> {
    debug!("Listing responses for form {}", id);

    let responses = state.responses.list_for_form(id).await?;

    Ok(Json(responses))
}
