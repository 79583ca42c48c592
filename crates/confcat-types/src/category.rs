use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed attribute classification of a session.
///
/// The nine categories form a closed taxonomy: every attribute value a
/// session carries lives in exactly one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Type,
    Level,
    Features,
    Topics,
    Roles,
    Services,
    Industries,
    Segments,
    AreasOfInterest,
}

impl Category {
    /// All categories in canonical (serialization) order.
    pub const ALL: [Category; 9] = [
        Category::Type,
        Category::Level,
        Category::Features,
        Category::Topics,
        Category::Roles,
        Category::Services,
        Category::Industries,
        Category::Segments,
        Category::AreasOfInterest,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Type => "type",
            Category::Level => "level",
            Category::Features => "features",
            Category::Topics => "topics",
            Category::Roles => "roles",
            Category::Services => "services",
            Category::Industries => "industries",
            Category::Segments => "segments",
            Category::AreasOfInterest => "areas_of_interest",
        }
    }

    /// Column header for the value column of a distribution table:
    /// the category name with trailing `s` characters stripped
    /// (`roles` -> `role`, `industries` -> `industrie`).
    pub fn value_label(&self) -> &'static str {
        self.as_str().trim_end_matches('s')
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == needle)
            .ok_or_else(|| crate::Error::UnknownCategory(s.to_string()))
    }
}

/// Attribute kind token as it appears in the catalog's `attribute_id` field.
///
/// Matching is case-insensitive. Tokens outside this set are not attribute
/// kinds the normalizer understands and are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    Type,
    Level,
    Features,
    Topic,
    Role,
    Services,
    Industry,
    Segment,
    AreaOfInterest,
}

impl AttributeKind {
    pub const ALL: [AttributeKind; 9] = [
        AttributeKind::Type,
        AttributeKind::Level,
        AttributeKind::Features,
        AttributeKind::Topic,
        AttributeKind::Role,
        AttributeKind::Services,
        AttributeKind::Industry,
        AttributeKind::Segment,
        AttributeKind::AreaOfInterest,
    ];

    /// Lowercase wire token.
    pub fn token(&self) -> &'static str {
        match self {
            AttributeKind::Type => "type",
            AttributeKind::Level => "level",
            AttributeKind::Features => "features",
            AttributeKind::Topic => "topic",
            AttributeKind::Role => "role",
            AttributeKind::Services => "services",
            AttributeKind::Industry => "industry",
            AttributeKind::Segment => "segment",
            AttributeKind::AreaOfInterest => "areaofinterest",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        let token = token.to_lowercase();
        AttributeKind::ALL.into_iter().find(|k| k.token() == token)
    }

    pub fn category(&self) -> Category {
        match self {
            AttributeKind::Type => Category::Type,
            AttributeKind::Level => Category::Level,
            AttributeKind::Features => Category::Features,
            AttributeKind::Topic => Category::Topics,
            AttributeKind::Role => Category::Roles,
            AttributeKind::Services => Category::Services,
            AttributeKind::Industry => Category::Industries,
            AttributeKind::Segment => Category::Segments,
            AttributeKind::AreaOfInterest => Category::AreasOfInterest,
        }
    }
}
