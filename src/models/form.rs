//! Form and form-field models
//!
//! The store carries two generations of text values side by side: legacy
//! rows hold bare strings, current rows hold per-language maps. Every text
//! slot is therefore a [`LocalizedText`] union decoded by shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A piece of display text, either a legacy bare string or a map of
/// language code to localized string.
///
/// Untagged: a JSON string decodes to `Plain`, an object to `PerLanguage`.
/// Values round-trip in whichever shape they arrived; nothing normalizes
/// them on the read or write path (the `/migrate-fields` admin endpoint is
/// the only place legacy shapes get rewritten).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocalizedText {
    Plain(String),
    PerLanguage(BTreeMap<String, String>),
}

/// One input element within a form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    pub id: String,
    /// Open tag: "text", "textarea", "select", "radio", "checkbox", "file", ...
    /// Unknown types are stored and reflected back untouched.
    #[serde(rename = "type")]
    pub field_type: String,
    pub label: LocalizedText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<LocalizedText>,
    #[serde(default)]
    pub required: bool,
    /// Choice-type fields only (select, radio, checkbox)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<LocalizedText>>,
    /// Opaque caller-defined rule bag, passed through verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<Map<String, Value>>,
}

/// A form definition as stored and served
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Form {
    pub id: i32,
    pub title: LocalizedText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<LocalizedText>,
    pub fields: Vec<FormField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submit_button_text: Option<LocalizedText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero_image_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating or fully replacing a form.
///
/// Update has no partial semantics: this payload overwrites every content
/// column of the row.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormPayload {
    pub title: LocalizedText,
    #[serde(default)]
    pub description: Option<LocalizedText>,
    #[serde(default)]
    pub fields: Vec<FormField>,
    #[serde(default)]
    pub submit_button_text: Option<LocalizedText>,
    #[serde(default)]
    pub hero_image_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_localized_text_sniffs_plain_strings() {
        let text: LocalizedText = serde_json::from_value(json!("Name")).unwrap();
        assert_eq!(text, LocalizedText::Plain("Name".to_string()));
    }

    #[test]
    fn test_localized_text_sniffs_language_maps() {
        let text: LocalizedText =
            serde_json::from_value(json!({"en": "Name", "ar": "الاسم"})).unwrap();
        let LocalizedText::PerLanguage(map) = text else {
            panic!("expected per-language variant");
        };
        assert_eq!(map.get("en").map(String::as_str), Some("Name"));
        assert_eq!(map.get("ar").map(String::as_str), Some("الاسم"));
    }

    #[test]
    fn test_localized_text_round_trips_in_arrival_shape() {
        for raw in [json!("Submit"), json!({"en": "Submit", "ar": ""})] {
            let text: LocalizedText = serde_json::from_value(raw.clone()).unwrap();
            assert_eq!(serde_json::to_value(&text).unwrap(), raw);
        }
    }

    #[test]
    fn test_localized_text_rejects_other_shapes() {
        assert!(serde_json::from_value::<LocalizedText>(json!(42)).is_err());
        assert!(serde_json::from_value::<LocalizedText>(json!(["en"])).is_err());
    }

    #[test]
    fn test_form_field_decodes_minimal_shape() {
        let field: FormField = serde_json::from_value(json!({
            "id": "q1",
            "type": "text",
            "label": "Name",
            "required": true
        }))
        .unwrap();
        assert_eq!(field.field_type, "text");
        assert!(field.required);
        assert!(field.placeholder.is_none());
        assert!(field.options.is_none());
        assert!(field.validation.is_none());
    }

    #[test]
    fn test_form_field_required_defaults_to_false() {
        let field: FormField = serde_json::from_value(json!({
            "id": "q2",
            "type": "select",
            "label": {"en": "Color", "ar": ""},
            "options": ["red", {"en": "blue", "ar": ""}]
        }))
        .unwrap();
        assert!(!field.required);
        // Mixed legacy/current option shapes decode side by side
        let options = field.options.unwrap();
        assert_eq!(options[0], LocalizedText::Plain("red".to_string()));
        assert!(matches!(options[1], LocalizedText::PerLanguage(_)));
    }

    #[test]
    fn test_validation_bag_passes_through_verbatim() {
        let raw = json!({
            "id": "age",
            "type": "number",
            "label": "Age",
            "validation": {"min": 18, "max": 99, "pattern": "\\d+", "custom": {"nested": true}}
        });
        let field: FormField = serde_json::from_value(raw.clone()).unwrap();
        let round_tripped = serde_json::to_value(&field).unwrap();
        assert_eq!(round_tripped["validation"], raw["validation"]);
    }

    #[test]
    fn test_form_serializes_camel_case_and_skips_absent_options() {
        let form = Form {
            id: 7,
            title: LocalizedText::Plain("Survey".to_string()),
            description: None,
            fields: vec![],
            submit_button_text: None,
            hero_image_url: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&form).unwrap();
        assert_eq!(json["isActive"], true);
        assert!(json.get("createdAt").is_some());
        assert!(json.get("description").is_none());
        assert!(json.get("heroImageUrl").is_none());
    }

    #[test]
    fn test_payload_requires_title() {
        let missing_title = serde_json::from_value::<FormPayload>(json!({"fields": []}));
        assert!(missing_title.is_err());

        let payload: FormPayload = serde_json::from_value(json!({"title": "Survey"})).unwrap();
        assert!(payload.fields.is_empty());
        assert!(payload.hero_image_url.is_none());
    }
}
