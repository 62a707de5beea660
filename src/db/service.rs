// Database services for form and response operations
//
// Handlers get these through AppState instead of a global handle, so tests
// and future callers can construct them against any pool.

use crate::db::queries;
use crate::error::AppError;
use crate::models::{Form, FormPayload, FormResponse, SubmitResponseRequest};
use chrono::Utc;
use deadpool_postgres::Pool;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio_postgres::Row;

/// Form service for database operations
pub struct FormService {
    pool: Pool,
}

impl FormService {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Insert a new form and return the canonical stored row
    pub async fn create(&self, payload: &FormPayload) -> Result<Form, AppError> {
        let client = self.pool.get().await?;

        let title = encode_json(&payload.title, "title")?;
        let description = encode_optional_json(payload.description.as_ref(), "description")?;
        let fields = encode_json(&payload.fields, "fields")?;
        let submit_button_text =
            encode_optional_json(payload.submit_button_text.as_ref(), "submit button text")?;

        let now = Utc::now();
        let row = client
            .query_one(
                queries::INSERT_FORM,
                &[
                    &title,
                    &description,
                    &fields,
                    &submit_button_text,
                    &payload.hero_image_url,
                    &now,
                ],
            )
            .await?;

        row_to_form(&row)
    }

    /// List active forms, newest first, plus the active total for page math
    pub async fn list(&self, page: i64, page_size: i64) -> Result<(Vec<Form>, i64), AppError> {
        let client = self.pool.get().await?;

        let count_row = client.query_one(queries::COUNT_ACTIVE_FORMS, &[]).await?;
        let total_count: i64 = count_row.get(0);

        let offset = (page - 1) * page_size;
        let rows = client
            .query(queries::LIST_ACTIVE_FORMS, &[&page_size, &offset])
            .await?;

        let forms = rows
            .iter()
            .map(row_to_form)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((forms, total_count))
    }

    /// Fetch an active form by id
    pub async fn get(&self, id: i32) -> Result<Option<Form>, AppError> {
        let client = self.pool.get().await?;

        let row = client.query_opt(queries::GET_ACTIVE_FORM, &[&id]).await?;
        row.as_ref().map(row_to_form).transpose()
    }

    /// Replace an active form's content in full and return the refreshed row.
    /// None means no active row matched.
    pub async fn update(&self, id: i32, payload: &FormPayload) -> Result<Option<Form>, AppError> {
        let client = self.pool.get().await?;

        let title = encode_json(&payload.title, "title")?;
        let description = encode_optional_json(payload.description.as_ref(), "description")?;
        let fields = encode_json(&payload.fields, "fields")?;
        let submit_button_text =
            encode_optional_json(payload.submit_button_text.as_ref(), "submit button text")?;

        let now = Utc::now();
        let row = client
            .query_opt(
                queries::UPDATE_FORM,
                &[
                    &id,
                    &title,
                    &description,
                    &fields,
                    &submit_button_text,
                    &payload.hero_image_url,
                    &now,
                ],
            )
            .await?;

        row.as_ref().map(row_to_form).transpose()
    }

    /// Flip is_active off; true when a row was actually deactivated
    pub async fn soft_delete(&self, id: i32) -> Result<bool, AppError> {
        let client = self.pool.get().await?;

        let now = Utc::now();
        let affected = client
            .execute(queries::SOFT_DELETE_FORM, &[&id, &now])
            .await?;

        Ok(affected > 0)
    }
}

/// Response service for database operations
pub struct ResponseService {
    pool: Pool,
}

impl ResponseService {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Record a submission and return the stored row.
    ///
    /// form_id is taken as given: no existence or is_active check, matching
    /// the store's append-only contract for responses.
    pub async fn submit(&self, submission: &SubmitResponseRequest) -> Result<FormResponse, AppError> {
        let client = self.pool.get().await?;

        let now = Utc::now();
        let language = submission.language_or_default();
        let row = client
            .query_one(
                queries::INSERT_RESPONSE,
                &[
                    &submission.form_id,
                    &submission.phone_number,
                    &submission.response_data,
                    &language,
                    &now,
                ],
            )
            .await?;

        Ok(row_to_response(&row))
    }

    /// All responses for a form, newest first
    pub async fn list_for_form(&self, form_id: i32) -> Result<Vec<FormResponse>, AppError> {
        let client = self.pool.get().await?;

        let rows = client
            .query(queries::LIST_RESPONSES_FOR_FORM, &[&form_id])
            .await?;

        Ok(rows.iter().map(row_to_response).collect())
    }
}

/// Decode a form row. The JSONB columns hold caller-defined shapes, so a
/// decode failure is a corrupt-store error, not a caller error.
fn row_to_form(row: &Row) -> Result<Form, AppError> {
    Ok(Form {
        id: row.get(0),
        title: decode_json(row.get(1), "title")?,
        description: decode_nullable_json(row.get(2), "description")?,
        fields: decode_json(row.get(3), "fields")?,
        submit_button_text: decode_nullable_json(row.get(4), "submit_button_text")?,
        hero_image_url: row.get(5),
        is_active: row.get(6),
        created_at: row.get(7),
        updated_at: row.get(8),
    })
}

fn row_to_response(row: &Row) -> FormResponse {
    FormResponse {
        id: row.get(0),
        form_id: row.get(1),
        phone_number: row.get(2),
        response_data: row.get(3),
        language: row.get(4),
        submitted_at: row.get(5),
    }
}

fn encode_json<T: serde::Serialize>(value: &T, what: &str) -> Result<Value, AppError> {
    serde_json::to_value(value)
        .map_err(|e| AppError::Internal(format!("Error encoding {}: {}", what, e)))
}

fn encode_optional_json<T: serde::Serialize>(
    value: Option<&T>,
    what: &str,
) -> Result<Option<Value>, AppError> {
    value.map(|v| encode_json(v, what)).transpose()
}

fn decode_json<T: DeserializeOwned>(value: Value, column: &str) -> Result<T, AppError> {
    serde_json::from_value(value)
        .map_err(|e| AppError::Internal(format!("Error parsing {} column: {}", column, e)))
}

fn decode_nullable_json<T: DeserializeOwned>(
    value: Option<Value>,
    column: &str,
) -> Result<Option<T>, AppError> {
    match value {
        // A stored JSON null decodes to None just like a SQL NULL
        Some(Value::Null) | None => Ok(None),
        Some(v) => decode_json(v, column).map(Some),
    }
}
