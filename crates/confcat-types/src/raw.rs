use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Session item as returned by the catalog search API.
///
/// Nothing about the payload is guaranteed: every field may be missing,
/// null, or of an unexpected JSON type. Fields are therefore kept as raw
/// JSON values and only interpreted by the normalizer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSession {
    #[serde(default)]
    pub code: Option<Value>,
    #[serde(default)]
    pub title: Option<Value>,
    #[serde(default, rename = "abstract")]
    pub abstract_text: Option<Value>,
    #[serde(default, rename = "type")]
    pub session_type: Option<Value>,
    #[serde(default)]
    pub length: Option<Value>,
    #[serde(default, rename = "sessionID")]
    pub session_id: Option<Value>,
    #[serde(default, rename = "eventId")]
    pub event_id: Option<Value>,
    #[serde(default)]
    pub published: Option<Value>,
    #[serde(default)]
    pub modified: Option<Value>,
    #[serde(default)]
    pub attributevalues: Option<Value>,
    #[serde(default)]
    pub participants: Option<Value>,
}

/// One `{attribute_id, value}` entry of a raw session.
#[derive(Debug, Clone, PartialEq)]
pub struct RawAttribute {
    pub kind: String,
    pub value: Option<Value>,
}

impl RawSession {
    /// Attribute entries in payload order.
    ///
    /// Entries that are not objects are skipped; a missing or non-string
    /// `attribute_id` yields an empty kind, which matches no known token.
    pub fn attributes(&self) -> Vec<RawAttribute> {
        let Some(Value::Array(entries)) = &self.attributevalues else {
            return Vec::new();
        };

        entries
            .iter()
            .filter_map(|entry| entry.as_object())
            .map(|entry| RawAttribute {
                kind: entry
                    .get("attribute_id")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                value: entry.get("value").filter(|v| !v.is_null()).cloned(),
            })
            .collect()
    }

    /// Participant records, or an empty list when the field is not an array.
    pub fn participants(&self) -> Vec<Value> {
        match &self.participants {
            Some(Value::Array(items)) => items.clone(),
            _ => Vec::new(),
        }
    }
}

/// Interpret a loosely typed scalar as a text label.
///
/// Strings pass through unchanged (including the empty string), numbers and
/// booleans are rendered, while null and composite values have no label.
pub fn value_to_label(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_tolerates_unexpected_types() {
        let raw: RawSession = serde_json::from_value(json!({
            "sessionID": 42,
            "title": null,
            "length": 60,
            "attributevalues": "not-a-list",
            "participants": {"fullName": "Ada"},
            "extra": true
        }))
        .unwrap();

        assert_eq!(raw.session_id, Some(json!(42)));
        assert_eq!(raw.title, None);
        assert!(raw.attributes().is_empty());
        assert!(raw.participants().is_empty());
    }

    #[test]
    fn test_attributes_skip_non_objects() {
        let raw: RawSession = serde_json::from_value(json!({
            "attributevalues": [
                {"attribute_id": "Role", "value": "Developer"},
                "junk",
                {"value": "orphan"},
                {"attribute_id": "level", "value": null}
            ]
        }))
        .unwrap();

        let attrs = raw.attributes();
        assert_eq!(attrs.len(), 3);
        assert_eq!(attrs[0].kind, "Role");
        assert_eq!(attrs[0].value, Some(json!("Developer")));
        assert_eq!(attrs[1].kind, "");
        assert_eq!(attrs[2].value, None);
    }

    #[test]
    fn test_value_to_label() {
        assert_eq!(value_to_label(&json!("")), Some(String::new()));
        assert_eq!(value_to_label(&json!(60)), Some("60".to_string()));
        assert_eq!(value_to_label(&json!(null)), None);
        assert_eq!(value_to_label(&json!(["a"])), None);
    }
}
