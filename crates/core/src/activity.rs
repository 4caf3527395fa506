//! Activity-log constants and detail payload builders.
//!
//! This module lives in `core` (zero internal deps) so both the service layer
//! and any store implementation agree on action names and payload shape.

use serde_json::{json, Value};

use crate::types::Row;

// ---------------------------------------------------------------------------
// Action constants
// ---------------------------------------------------------------------------

/// Actions recorded in the activity log.
pub mod actions {
    pub const CREATE: &str = "create";
    pub const UPDATE: &str = "update";
    pub const DELETE: &str = "delete";
}

// ---------------------------------------------------------------------------
// Labels and details
// ---------------------------------------------------------------------------

/// Human label for a record: the first non-null of `fields`, usually
/// `name` then `title`.
///
/// A present-but-null field falls through to the next; an empty string does not.
pub fn display_label(data: &Row, fields: &[&str]) -> Option<String> {
    fields
        .iter()
        .filter_map(|key| data.get(*key))
        .find(|v| !v.is_null())
        .map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
}

pub fn create_details(label: Option<&str>) -> Value {
    json!({ "name": label })
}

pub fn update_details(label: Option<&str>, changed_fields: &[String]) -> Value {
    json!({ "name": label, "changed_fields": changed_fields })
}

pub fn delete_details(label: Option<&str>) -> Value {
    json!({ "name": label })
}

// ---------------------------------------------------------------------------
// Sensitive field redaction
// ---------------------------------------------------------------------------

/// Key fragments whose values never reach the activity log.
pub const SENSITIVE_FIELDS: &[&str] = &[
    "password",
    "token",
    "secret",
    "api_key",
    "private_key",
    "authorization",
    "credential",
];

/// Replace the value of any key containing a [`SENSITIVE_FIELDS`] fragment
/// with `"[REDACTED]"`, recursing into nested objects and arrays.
pub fn redact_sensitive_fields(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut redacted = serde_json::Map::new();
            for (key, val) in map {
                let lower_key = key.to_lowercase();
                if SENSITIVE_FIELDS.iter().any(|f| lower_key.contains(f)) {
                    redacted.insert(key.clone(), Value::String("[REDACTED]".to_string()));
                } else {
                    redacted.insert(key.clone(), redact_sensitive_fields(val));
                }
            }
            Value::Object(redacted)
        }
        Value::Array(arr) => Value::Array(arr.iter().map(redact_sensitive_fields).collect()),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAME_THEN_TITLE: &[&str] = &["name", "title"];

    fn row(value: Value) -> Row {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn label_prefers_name_over_title() {
        let data = row(json!({ "name": "Ada", "title": "Partner" }));
        assert_eq!(display_label(&data, NAME_THEN_TITLE).as_deref(), Some("Ada"));
    }

    #[test]
    fn label_falls_back_to_title() {
        let data = row(json!({ "name": null, "title": "Riverside House" }));
        assert_eq!(
            display_label(&data, NAME_THEN_TITLE).as_deref(),
            Some("Riverside House")
        );
    }

    #[test]
    fn label_absent_when_neither_field() {
        assert_eq!(display_label(&row(json!({ "slug": "x" })), NAME_THEN_TITLE), None);
    }

    #[test]
    fn label_follows_given_fields() {
        let data = row(json!({ "full_name": null, "email": "ada@atelier.test", "name": "x" }));
        assert_eq!(
            display_label(&data, &["full_name", "email"]).as_deref(),
            Some("ada@atelier.test")
        );
    }

    #[test]
    fn update_details_lists_changed_fields() {
        let details = update_details(Some("Loft"), &["title".into(), "updated_at".into()]);
        assert_eq!(details["changed_fields"], json!(["title", "updated_at"]));
        assert_eq!(details["name"], "Loft");
    }

    #[test]
    fn redacts_nested_sensitive_keys() {
        let value = json!({
            "name": "ok",
            "nested": { "api_key": "abc", "list": [{ "refresh_token": "t" }] }
        });
        let redacted = redact_sensitive_fields(&value);
        assert_eq!(redacted["name"], "ok");
        assert_eq!(redacted["nested"]["api_key"], "[REDACTED]");
        assert_eq!(redacted["nested"]["list"][0]["refresh_token"], "[REDACTED]");
    }
}
