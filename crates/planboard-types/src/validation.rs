use serde_json::Value;
use std::collections::BTreeMap;

/// Reserved key carrying messages not tied to a single field.
pub const NON_FIELD_KEY: &str = "non_field_errors";

/// A field-level validation failure body from the remote store.
///
/// Decoded tolerantly: keys map to message lists, a bare string counts
/// as a one-message list, entries of any other shape are skipped, and
/// a payload without the object shape yields `None` so the caller
/// falls back to the generic-failure path. Malformed input never
/// panics.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors {
    fields: BTreeMap<String, Vec<String>>,
    non_field: Vec<String>,
}

impl ValidationErrors {
    /// Decode a failure body, returning `None` when it does not carry
    /// the field-error shape.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let mut errors = ValidationErrors::default();
        for (key, entry) in object {
            let messages = collect_messages(entry);
            if messages.is_empty() {
                continue;
            }
            if key == NON_FIELD_KEY {
                errors.non_field = messages;
            } else {
                errors.fields.insert(key.clone(), messages);
            }
        }
        if errors.is_empty() { None } else { Some(errors) }
    }

    /// Per-field message lists, in field-name order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields.iter().map(|(key, messages)| (key.as_str(), messages.as_slice()))
    }

    /// Messages for one field, if any.
    pub fn field(&self, name: &str) -> Option<&[String]> {
        self.fields.get(name).map(Vec::as_slice)
    }

    /// Messages not tied to a single field.
    pub fn non_field(&self) -> &[String] {
        &self.non_field
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.non_field.is_empty()
    }
}

fn collect_messages(entry: &Value) -> Vec<String> {
    match entry {
        Value::String(message) => vec![message.clone()],
        Value::Array(items) => items.iter().filter_map(scalar_message).collect(),
        _ => Vec::new(),
    }
}

fn scalar_message(item: &Value) -> Option<String> {
    match item {
        Value::String(message) => Some(message.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_decodes_field_lists() {
        let body = json!({
            "name": ["This field is required."],
            "startAt": ["Invalid datetime.", "Expected ISO 8601."],
        });
        let errors = ValidationErrors::from_value(&body).unwrap();
        assert_eq!(errors.field("name").unwrap(), ["This field is required."]);
        assert_eq!(errors.field("startAt").unwrap().len(), 2);
        assert!(errors.non_field().is_empty());
    }

    #[test]
    fn test_from_value_accepts_bare_string_messages() {
        let body = json!({ "detail": "Not enough room." });
        let errors = ValidationErrors::from_value(&body).unwrap();
        assert_eq!(errors.field("detail").unwrap(), ["Not enough room."]);
    }

    #[test]
    fn test_from_value_splits_non_field_errors() {
        let body = json!({
            "non_field_errors": ["End precedes start.", "Pick another range."],
            "name": ["Too long."],
        });
        let errors = ValidationErrors::from_value(&body).unwrap();
        assert_eq!(errors.non_field().len(), 2);
        assert_eq!(errors.fields().count(), 1);
    }

    #[test]
    fn test_from_value_rejects_shapeless_payloads() {
        assert!(ValidationErrors::from_value(&json!("oops")).is_none());
        assert!(ValidationErrors::from_value(&json!(["oops"])).is_none());
        assert!(ValidationErrors::from_value(&json!({})).is_none());
        assert!(ValidationErrors::from_value(&json!({ "name": { "nested": true } })).is_none());
    }

    #[test]
    fn test_from_value_coerces_scalar_list_items() {
        let body = json!({ "count": [3, true, "low"], "skip": [[1]] });
        let errors = ValidationErrors::from_value(&body).unwrap();
        assert_eq!(errors.field("count").unwrap(), ["3", "true", "low"]);
        assert!(errors.field("skip").is_none());
    }
}
