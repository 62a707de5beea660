//! SQL statement constants
//!
//! Contains all SQL statements used by the application. Form text columns
//! (title, description, fields, submit_button_text) are JSONB: the stored
//! shape is caller-defined and may be either a bare string (legacy) or a
//! per-language map.

/// Create the forms table
pub const CREATE_FORMS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS forms (
        id SERIAL PRIMARY KEY,
        title JSONB NOT NULL,
        description JSONB,
        fields JSONB NOT NULL,
        submit_button_text JSONB,
        hero_image_url VARCHAR(512),
        is_active BOOLEAN NOT NULL DEFAULT true,
        created_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP,
        updated_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
"#;

/// Create the form_responses table
///
/// form_id is deliberately not a foreign key: responses outlive their form
/// (soft delete) and submission must never fail on a dangling id.
pub const CREATE_RESPONSES_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS form_responses (
        id SERIAL PRIMARY KEY,
        form_id INTEGER NOT NULL,
        phone_number TEXT NOT NULL,
        response_data JSONB NOT NULL,
        language VARCHAR(2) NOT NULL DEFAULT 'en',
        submitted_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
"#;

pub const CREATE_RESPONSES_FORM_ID_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_form_responses_form_id ON form_responses(form_id)";

/// Insert a form and hand back the canonical row, defaults included
pub const INSERT_FORM: &str = r#"
    INSERT INTO forms (title, description, fields, submit_button_text, hero_image_url, is_active, created_at, updated_at)
    VALUES ($1, $2, $3, $4, $5, true, $6, $6)
    RETURNING id, title, description, fields, submit_button_text, hero_image_url, is_active, created_at, updated_at
"#;

pub const COUNT_ACTIVE_FORMS: &str = "SELECT COUNT(*) FROM forms WHERE is_active = true";

pub const LIST_ACTIVE_FORMS: &str = r#"
    SELECT id, title, description, fields, submit_button_text, hero_image_url, is_active, created_at, updated_at
    FROM forms
    WHERE is_active = true
    ORDER BY created_at DESC
    LIMIT $1 OFFSET $2
"#;

pub const GET_ACTIVE_FORM: &str = r#"
    SELECT id, title, description, fields, submit_button_text, hero_image_url, is_active, created_at, updated_at
    FROM forms
    WHERE id = $1 AND is_active = true
"#;

/// Full-payload replace; zero rows means the form is gone or inactive
pub const UPDATE_FORM: &str = r#"
    UPDATE forms
    SET title = $2, description = $3, fields = $4, submit_button_text = $5, hero_image_url = $6, updated_at = $7
    WHERE id = $1 AND is_active = true
    RETURNING id, title, description, fields, submit_button_text, hero_image_url, is_active, created_at, updated_at
"#;

pub const SOFT_DELETE_FORM: &str = r#"
    UPDATE forms
    SET is_active = false, updated_at = $2
    WHERE id = $1 AND is_active = true
"#;

pub const INSERT_RESPONSE: &str = r#"
    INSERT INTO form_responses (form_id, phone_number, response_data, language, submitted_at)
    VALUES ($1, $2, $3, $4, $5)
    RETURNING id, form_id, phone_number, response_data, language, submitted_at
"#;

pub const LIST_RESPONSES_FOR_FORM: &str = r#"
    SELECT id, form_id, phone_number, response_data, language, submitted_at
    FROM form_responses
    WHERE form_id = $1
    ORDER BY submitted_at DESC
"#;

// ── Admin migration statements ──────────────────────────────────────────

pub const WIDEN_HERO_IMAGE_COLUMN: &str =
    "ALTER TABLE forms ALTER COLUMN hero_image_url TYPE TEXT";

pub const ADD_RESPONSE_LANGUAGE_COLUMN: &str =
    "ALTER TABLE form_responses ADD COLUMN IF NOT EXISTS language VARCHAR(2) DEFAULT 'en'";

/// The structural migration scans every form, active or not
pub const LIST_ALL_FORM_FIELDS: &str = "SELECT id, fields FROM forms";

pub const REPLACE_FORM_FIELDS: &str = "UPDATE forms SET fields = $2 WHERE id = $1";

#[cfg(test)]
mod tests {
    use super::*;

    const FORM_COLUMNS: &str =
        "id, title, description, fields, submit_button_text, hero_image_url, is_active, created_at, updated_at";

    #[test]
    fn test_form_statements_select_consistent_columns() {
        for statement in [INSERT_FORM, LIST_ACTIVE_FORMS, GET_ACTIVE_FORM, UPDATE_FORM] {
            assert!(
                statement.contains(FORM_COLUMNS),
                "statement does not return the canonical form columns: {}",
                statement
            );
        }
    }

    #[test]
    fn test_read_paths_exclude_inactive_forms() {
        for statement in [COUNT_ACTIVE_FORMS, LIST_ACTIVE_FORMS, GET_ACTIVE_FORM, UPDATE_FORM] {
            assert!(statement.contains("is_active = true"));
        }
        // The structural migration is the one deliberate exception
        assert!(!LIST_ALL_FORM_FIELDS.contains("is_active"));
    }
}
