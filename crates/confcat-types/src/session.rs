use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Category;

/// Canonical conference session.
///
/// Optional fields use `None` as the explicit "absent" marker; an empty
/// string is a real value. Absent fields serialize as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, rename = "abstract")]
    pub abstract_text: Option<String>,
    #[serde(default, rename = "type")]
    pub session_type: Option<String>,
    #[serde(default)]
    pub length: Option<String>,
    /// Identity key used for deduplication.
    #[serde(default, rename = "sessionId", alias = "sessionID")]
    pub session_id: Option<String>,
    #[serde(default, rename = "eventId")]
    pub event_id: Option<Value>,
    #[serde(default)]
    pub published: Option<Value>,
    #[serde(default)]
    pub modified: Option<Value>,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub speakers: Vec<Value>,
}

impl Session {
    /// Identity key, if the session has a non-empty one.
    pub fn identity(&self) -> Option<&str> {
        self.session_id.as_deref().filter(|id| !id.is_empty())
    }

    /// Values of one category, in payload order.
    pub fn values(&self, category: Category) -> &[String] {
        self.attributes.get(category)
    }
}

/// Attribute values bucketed by category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes {
    #[serde(default, rename = "type")]
    pub session_type: Vec<String>,
    #[serde(default)]
    pub level: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub industries: Vec<String>,
    #[serde(default)]
    pub segments: Vec<String>,
    #[serde(default)]
    pub areas_of_interest: Vec<String>,
}

impl Attributes {
    pub fn get(&self, category: Category) -> &[String] {
        match category {
            Category::Type => &self.session_type,
            Category::Level => &self.level,
            Category::Features => &self.features,
            Category::Topics => &self.topics,
            Category::Roles => &self.roles,
            Category::Services => &self.services,
            Category::Industries => &self.industries,
            Category::Segments => &self.segments,
            Category::AreasOfInterest => &self.areas_of_interest,
        }
    }

    pub fn get_mut(&mut self, category: Category) -> &mut Vec<String> {
        match category {
            Category::Type => &mut self.session_type,
            Category::Level => &mut self.level,
            Category::Features => &mut self.features,
            Category::Topics => &mut self.topics,
            Category::Roles => &mut self.roles,
            Category::Services => &mut self.services,
            Category::Industries => &mut self.industries,
            Category::Segments => &mut self.segments,
            Category::AreasOfInterest => &mut self.areas_of_interest,
        }
    }

    pub fn push(&mut self, category: Category, value: impl Into<String>) {
        self.get_mut(category).push(value.into());
    }

    pub fn contains(&self, category: Category, value: &str) -> bool {
        self.get(category).iter().any(|v| v == value)
    }

    pub fn is_empty(&self) -> bool {
        Category::ALL.iter().all(|c| self.get(*c).is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_fields_serialize_as_null() {
        let session = Session {
            session_id: Some("A1".to_string()),
            title: Some(String::new()),
            ..Default::default()
        };

        let value = serde_json::to_value(&session).unwrap();
        assert_eq!(value["sessionId"], json!("A1"));
        assert_eq!(value["title"], json!(""));
        assert_eq!(value["code"], Value::Null);
        assert_eq!(value["abstract"], Value::Null);
        assert_eq!(value["attributes"]["areas_of_interest"], json!([]));
        assert_eq!(value["attributes"]["type"], json!([]));
    }

    #[test]
    fn test_legacy_identity_field_is_accepted() {
        let session: Session = serde_json::from_value(json!({
            "sessionID": "legacy-1",
            "attributes": {"roles": ["Developer"]}
        }))
        .unwrap();

        assert_eq!(session.identity(), Some("legacy-1"));
        assert_eq!(session.values(Category::Roles), ["Developer"]);
        assert!(session.values(Category::Topics).is_empty());
    }

    #[test]
    fn test_empty_identity_is_not_an_identity() {
        let session = Session {
            session_id: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(session.identity(), None);
    }

    #[test]
    fn test_attributes_accessors_cover_every_category() {
        let mut attrs = Attributes::default();
        assert!(attrs.is_empty());

        for category in Category::ALL {
            attrs.push(category, category.as_str());
        }
        for category in Category::ALL {
            assert_eq!(attrs.get(category), [category.as_str()]);
            assert!(attrs.contains(category, category.as_str()));
        }
        assert!(!attrs.is_empty());
    }
}
