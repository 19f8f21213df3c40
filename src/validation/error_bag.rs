use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Failed-rule messages keyed by field name
///
/// Messages keep the order in which rules failed. A message already recorded
/// for a field is not recorded twice, so rules sharing a message report it once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorBag {
    fields: BTreeMap<String, Vec<String>>,
}

impl ErrorBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        let message = message.into();
        let messages = self.fields.entry(field.to_string()).or_default();

        if !messages.contains(&message) {
            messages.push(message);
        }
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    /// The message a form shows next to the field
    pub fn first(&self, field: &str) -> Option<&str> {
        self.fields
            .get(field)
            .and_then(|messages| messages.first())
            .map(String::as_str)
    }

    pub fn has(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.keys().map(String::as_str).collect()
    }

    pub fn clear(&mut self) {
        self.fields.clear();
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_keeps_order() {
        let mut bag = ErrorBag::new();
        bag.add("password", "first");
        bag.add("password", "second");

        assert_eq!(
            bag.get("password").unwrap(),
            &["first".to_string(), "second".to_string()]
        );
        assert_eq!(bag.first("password"), Some("first"));
    }

    #[test]
    fn test_add_skips_duplicate_message() {
        let mut bag = ErrorBag::new();
        bag.add("password", "same");
        bag.add("password", "same");

        assert_eq!(bag.get("password").unwrap().len(), 1);
    }

    #[test]
    fn test_same_message_on_different_fields() {
        let mut bag = ErrorBag::new();
        bag.add("name", "bad");
        bag.add("email", "bad");

        assert_eq!(bag.len(), 2);
        assert!(bag.has("name"));
        assert!(bag.has("email"));
        assert!(!bag.has("password"));
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let mut bag = ErrorBag::new();
        bag.add("name", "Name is required");

        let json = serde_json::to_value(&bag).unwrap();
        assert_eq!(json, serde_json::json!({"name": ["Name is required"]}));

        let back: ErrorBag = serde_json::from_value(json).unwrap();
        assert_eq!(back, bag);
    }

    #[test]
    fn test_clear() {
        let mut bag = ErrorBag::new();
        bag.add("email", "Enter a valid email");
        bag.clear();

        assert!(bag.is_empty());
        assert_eq!(bag.first("email"), None);
    }
}
