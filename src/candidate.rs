//! Candidate records returned by the player search gateway.
//!
//! Which field holds the identifier and which holds the display text is
//! decided by each picker, so a candidate is kept as a raw JSON object.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single search result record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Candidate(Map<String, Value>);

impl Candidate {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Build a candidate from `(field, value)` pairs
    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Render a field as option text.
    ///
    /// Strings are returned as-is, numbers and booleans are formatted.
    /// Missing fields, nulls, empty strings and nested values yield `None`.
    pub fn field_text(&self, field: &str) -> Option<String> {
        match self.0.get(field)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for Candidate {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_text_numeric_id() {
        let c = Candidate::from_pairs([("ID", json!(7)), ("Nickname", json!("alice"))]);
        assert_eq!(c.field_text("ID").as_deref(), Some("7"));
        assert_eq!(c.field_text("Nickname").as_deref(), Some("alice"));
    }

    #[test]
    fn test_field_text_url_path() {
        let c = Candidate::from_pairs([("URLPath", json!("alice")), ("Nickname", json!("Alice"))]);
        assert_eq!(c.field_text("URLPath").as_deref(), Some("alice"));
    }

    #[test]
    fn test_field_text_missing_or_unrenderable() {
        let c = Candidate::from_pairs([
            ("Empty", json!("")),
            ("Null", Value::Null),
            ("Aliases", json!(["al", "ally"])),
        ]);
        assert_eq!(c.field_text("Missing"), None);
        assert_eq!(c.field_text("Empty"), None);
        assert_eq!(c.field_text("Null"), None);
        assert_eq!(c.field_text("Aliases"), None);
    }

    #[test]
    fn test_deserialize_gateway_record() {
        let raw = r#"{"ID":"3f2a","Nickname":"Mango","URLPath":"mango","Aliases":[]}"#;
        let c: Candidate = serde_json::from_str(raw).unwrap();
        assert_eq!(c.field_text("ID").as_deref(), Some("3f2a"));
        assert_eq!(c.field_text("URLPath").as_deref(), Some("mango"));
        assert_eq!(c.fields().len(), 4);
    }
}
