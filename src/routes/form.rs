//! Form CRUD route handlers
//!
//! Forms are soft-deleted: every read and update path here sees only
//! active rows.

use crate::error::{not_found_error, ApiResult};
use crate::models::{Form, FormPayload, MessageResponse, Page, PageQuery};
use crate::state::SharedState;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::{debug, info};

/// Create a new form
pub async fn create_form(
    State(state): State<SharedState>,
    Json(payload): Json<FormPayload>,
) -> ApiResult<Json<Form>> {
    debug!("Creating form with {} fields", payload.fields.len());

    let form = state.forms.create(&payload).await?;

    info!("Form {} created", form.id);
    Ok(Json(form))
}

/// List active forms, newest first, in a page envelope
pub async fn list_forms(
    State(state): State<SharedState>,
    Query(params): Query<PageQuery>,
) -> ApiResult<Json<Page<Form>>> {
    let (page, page_size) = params.normalize();
    debug!("Listing forms (page {}, size {})", page, page_size);

    let (forms, total_count) = state.forms.list(page, page_size).await?;

    Ok(Json(Page::new(forms, total_count, page, page_size)))
}

/// Fetch a single active form by id
pub async fn get_form(
    State(state): State<SharedState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<Form>> {
    state
        .forms
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| not_found_error(format!("Form {} not found", id)))
}

/// Replace a form's content in full; partial updates are not supported
pub async fn update_form(
    State(state): State<SharedState>,
    Path(id): Path<i32>,
    Json(payload): Json<FormPayload>,
) -> ApiResult<Json<Form>> {
    debug!("Updating form {} with {} fields", id, payload.fields.len());

    let updated = state
        .forms
        .update(id, &payload)
        .await?
        .ok_or_else(|| not_found_error(format!("Form {} not found", id)))?;

    info!("Form {} updated", id);
    Ok(Json(updated))
}

/// Soft-delete a form; the row and its responses are retained
pub async fn delete_form(
    State(state): State<SharedState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<MessageResponse>> {
    if !state.forms.soft_delete(id).await? {
        return Err(not_found_error(format!("Form {} not found", id)));
    }

    info!("Form {} soft-deleted", id);
    Ok(Json(MessageResponse::new("Form deleted successfully.")))
}
