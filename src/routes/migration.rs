//! One-off admin migration handlers
//!
//! These endpoints reshape stored data for the multi-language rollout. They
//! run once at deployment time, are idempotent, and offer no rollback.

use crate::db::queries;
use crate::error::ApiResult;
use crate::models::{FieldMigrationReport, MigrationStatus};
use crate::state::SharedState;
use axum::{extract::State, Json};
use serde_json::{json, Value};
use tracing::{info, warn};

/// Widen forms.hero_image_url from VARCHAR(512) to TEXT
pub async fn migrate_hero_image(
    State(state): State<SharedState>,
) -> ApiResult<Json<MigrationStatus>> {
    let client = state.db_pool.get().await?;

    client.execute(queries::WIDEN_HERO_IMAGE_COLUMN, &[]).await?;

    info!("Migrated hero_image_url column to TEXT");
    Ok(Json(MigrationStatus::success(
        "hero_image_url column migrated to TEXT",
    )))
}

/// Add the language column to form_responses
pub async fn migrate_multi_language(
    State(state): State<SharedState>,
) -> ApiResult<Json<MigrationStatus>> {
    let client = state.db_pool.get().await?;

    client
        .execute(queries::ADD_RESPONSE_LANGUAGE_COLUMN, &[])
        .await?;

    info!("Migrated database for multi-language support");
    Ok(Json(MigrationStatus::success(
        "Multi-language migration completed successfully",
    )))
}

/// Rewrite legacy field shapes across every stored form.
///
/// Scans all forms, inactive ones included, and rewrites bare-string
/// labels, placeholders and option lists into the per-language map shape.
/// A form that fails to decode is logged and skipped rather than aborting
/// the sweep.
pub async fn migrate_fields(
    State(state): State<SharedState>,
) -> ApiResult<Json<FieldMigrationReport>> {
    let client = state.db_pool.get().await?;

    let rows = client.query(queries::LIST_ALL_FORM_FIELDS, &[]).await?;

    let mut report = FieldMigrationReport::default();
    for row in rows {
        let form_id: i32 = row.get(0);
        let mut fields: Value = row.get(1);

        let Some(items) = fields.as_array_mut() else {
            warn!("Skipping form {}: fields column is not an array", form_id);
            continue;
        };

        let migrated = localize_legacy_fields(items);
        if migrated == 0 {
            continue;
        }

        if let Err(e) = client
            .execute(queries::REPLACE_FORM_FIELDS, &[&form_id, &fields])
            .await
        {
            warn!("Error writing migrated fields for form {}: {}", form_id, e);
            continue;
        }

        info!("Migrated {} field values in form {}", migrated, form_id);
        report.migrated_forms += 1;
        report.migrated_fields += migrated;
    }

    Ok(Json(report))
}

/// Rewrite legacy plain-string labels, placeholders and option lists into
/// the per-language map shape. Returns the number of values rewritten.
///
/// Option lists are only rewritten when every entry is a legacy string; a
/// list already holding maps (or a mix) is left alone.
fn localize_legacy_fields(fields: &mut [Value]) -> u32 {
    let mut migrated = 0;

    for field in fields.iter_mut() {
        let Some(object) = field.as_object_mut() else {
            continue;
        };

        for key in ["label", "placeholder"] {
            if let Some(value) = object.get_mut(key) {
                if localize_text_value(value) {
                    migrated += 1;
                }
            }
        }

        if let Some(Value::Array(options)) = object.get_mut("options") {
            if !options.is_empty() && options.iter().all(Value::is_string) {
                for option in options.iter_mut() {
                    localize_text_value(option);
                    migrated += 1;
                }
            }
        }
    }

    migrated
}

/// Rewrap a bare string as its per-language equivalent
fn localize_text_value(value: &mut Value) -> bool {
    match value {
        Value::String(text) => {
            *value = json!({ "en": std::mem::take(text), "ar": "" });
            true
        }
        _ => false,
    }
}
