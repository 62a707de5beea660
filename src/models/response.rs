//! Form submission models
//!
//! Responses are append-only: once stored they are never updated or
//! deleted, and they survive the soft delete of their form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

/// Fallback language code when a submission does not carry one
pub const DEFAULT_LANGUAGE: &str = "en";

/// One end-user submission against a form's schema
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormResponse {
    pub id: i32,
    pub form_id: i32,
    pub phone_number: String,
    /// Opaque object keyed by field id; stored and reflected back verbatim
    pub response_data: Value,
    pub language: String,
    pub submitted_at: DateTime<Utc>,
}

/// Request body for POST /api/submit
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponseRequest {
    #[serde(default)]
    pub form_id: i32,

    /// The submitter's identity. Presence is the only validation the server
    /// performs; format and uniqueness are the caller's concern.
    #[serde(default)]
    #[validate(length(min = 1, message = "Phone number is required"))]
    pub phone_number: String,

    #[serde(default)]
    pub response_data: Value,

    #[serde(default)]
    pub language: Option<String>,
}

impl SubmitResponseRequest {
    /// Language code to persist, defaulting absent or empty values
    pub fn language_or_default(&self) -> &str {
        match self.language.as_deref() {
            Some(lang) if !lang.is_empty() => lang,
            _ => DEFAULT_LANGUAGE,
        }
    }
}

/// Outcome envelope for the one-shot schema migrations
#[derive(Debug, Serialize)]
pub struct MigrationStatus {
    pub status: String,
    pub message: String,
}

impl MigrationStatus {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: "success".to_string(),
            message: message.into(),
        }
    }
}

/// Counts reported by the structural field migration.
///
/// Serialized in snake_case on purpose: the deployment tooling that drives
/// /migrate-fields reads these exact keys.
#[derive(Debug, Default, Serialize, PartialEq)]
pub struct FieldMigrationReport {
    pub migrated_forms: u32,
    pub migrated_fields: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn submission(raw: Value) -> Result<SubmitResponseRequest, serde_json::Error> {
        serde_json::from_value(raw)
    }

    #[test]
    fn test_submit_request_decodes_full_payload() {
        let req = submission(json!({
            "formId": 3,
            "phoneNumber": "+15550100",
            "responseData": {"q1": "Alice"},
            "language": "ar"
        }))
        .unwrap();
        assert_eq!(req.form_id, 3);
        assert_eq!(req.language_or_default(), "ar");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_missing_phone_number_fails_validation() {
        let req = submission(json!({"formId": 1, "responseData": {}})).unwrap();
        assert!(req.validate().is_err());

        let empty = submission(json!({"formId": 1, "phoneNumber": ""})).unwrap();
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_language_defaults_to_english() {
        let absent = submission(json!({"formId": 1, "phoneNumber": "123"})).unwrap();
        assert_eq!(absent.language_or_default(), DEFAULT_LANGUAGE);

        let empty = submission(json!({"formId": 1, "phoneNumber": "123", "language": ""})).unwrap();
        assert_eq!(empty.language_or_default(), DEFAULT_LANGUAGE);
    }

    #[test]
    fn test_response_data_round_trips_nested_values() {
        let data = json!({
            "q1": "Alice",
            "q2": ["red", "blue"],
            "q3": {"street": "Main St", "number": 7, "verified": false}
        });
        let req = submission(json!({
            "formId": 1,
            "phoneNumber": "123",
            "responseData": data.clone()
        }))
        .unwrap();
        assert_eq!(req.response_data, data);
    }

    #[test]
    fn test_form_response_serializes_camel_case() {
        let response = FormResponse {
            id: 9,
            form_id: 3,
            phone_number: "+15550100".to_string(),
            response_data: json!({"q1": "Alice"}),
            language: "en".to_string(),
            submitted_at: Utc::now(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["formId"], 3);
        assert_eq!(json["phoneNumber"], "+15550100");
        assert!(json.get("submittedAt").is_some());
    }

    #[test]
    fn test_migration_report_uses_snake_case_keys() {
        let report = FieldMigrationReport {
            migrated_forms: 2,
            migrated_fields: 5,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json, json!({"migrated_forms": 2, "migrated_fields": 5}));
    }
}
