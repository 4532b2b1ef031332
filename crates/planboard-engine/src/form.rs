use planboard_types::ValidationErrors;
use std::collections::BTreeMap;

/// Field-keyed error strings for one form, collapsed from a remote
/// validation failure for display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    by_field: BTreeMap<String, String>,
    notice: Option<String>,
}

impl FieldErrors {
    /// Per-field message lists join with `", "` into one string per
    /// field; `non_field_errors` join with `" "` into one standalone
    /// notice.
    pub fn from_validation(errors: &ValidationErrors) -> Self {
        let by_field = errors
            .fields()
            .map(|(field, messages)| (field.to_string(), messages.join(", ")))
            .collect();
        let notice = if errors.non_field().is_empty() {
            None
        } else {
            Some(errors.non_field().join(" "))
        };
        Self { by_field, notice }
    }

    /// The collapsed message for one field, if any.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.by_field.get(field).map(String::as_str)
    }

    /// The standalone message carried by `non_field_errors`, if any.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Field/message pairs in field-name order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.by_field.iter().map(|(field, message)| (field.as_str(), message.as_str()))
    }

    pub fn len(&self) -> usize {
        self.by_field.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_field.is_empty() && self.notice.is_none()
    }

    pub fn clear(&mut self) {
        self.by_field.clear();
        self.notice = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn mapped(body: serde_json::Value) -> FieldErrors {
        FieldErrors::from_validation(&ValidationErrors::from_value(&body).unwrap())
    }

    #[test]
    fn test_field_messages_join_with_comma() {
        let errors = mapped(json!({
            "name": ["This field is required.", "Too short."],
            "startAt": ["Invalid datetime."],
        }));
        assert_eq!(errors.get("name").unwrap(), "This field is required., Too short.");
        assert_eq!(errors.get("startAt").unwrap(), "Invalid datetime.");
        assert_eq!(errors.len(), 2);
        assert!(errors.notice().is_none());
    }

    #[test]
    fn test_non_field_messages_join_with_space() {
        let errors = mapped(json!({
            "non_field_errors": ["End precedes start.", "Pick another range."],
        }));
        assert_eq!(errors.notice().unwrap(), "End precedes start. Pick another range.");
        assert_eq!(errors.len(), 0);
        assert!(!errors.is_empty());
    }

    #[test]
    fn test_clear_empties_both_sides() {
        let mut errors = mapped(json!({
            "name": ["required"],
            "non_field_errors": ["nope"],
        }));
        errors.clear();
        assert!(errors.is_empty());
        assert!(errors.get("name").is_none());
        assert!(errors.notice().is_none());
    }
}
