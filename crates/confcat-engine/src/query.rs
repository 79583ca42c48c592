//! Read-side queries over a normalized session collection.
//!
//! These back the `session`, `category`, `speaker` and `service` commands.
//! Unlike the report pipeline, counts here are presence-based: a session
//! listing a value twice is counted once.

use confcat_types::{Attributes, Category, Session};
use serde::Serialize;
use serde_json::Value;
use std::collections::{HashMap, HashSet};

/// Offset pagination with a numeric string cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub limit: usize,
    pub cursor: Option<String>,
}

impl Page {
    pub fn new(limit: usize, cursor: Option<&str>) -> Self {
        Self {
            limit,
            cursor: cursor.map(str::to_string),
        }
    }

    pub fn first(limit: usize) -> Self {
        Self::new(limit, None)
    }

    /// Start offset; an unparseable cursor starts from the beginning.
    fn start(&self) -> usize {
        self.cursor
            .as_deref()
            .and_then(|c| c.trim().parse().ok())
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paged<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub has_more: bool,
    pub next_cursor: Option<String>,
}

fn paginate<T>(results: Vec<T>, page: &Page) -> Paged<T> {
    let total = results.len();
    let start = page.start().min(total);
    let end = start.saturating_add(page.limit);
    let has_more = end < total;

    Paged {
        items: results.into_iter().skip(start).take(page.limit).collect(),
        total,
        has_more,
        next_cursor: has_more.then(|| end.to_string()),
    }
}

/// Minimal projection of a session used in listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub code: Option<String>,
    pub title: Option<String>,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
}

impl From<&Session> for SessionSummary {
    fn from(session: &Session) -> Self {
        Self {
            code: session.code.clone(),
            title: session.title.clone(),
            abstract_text: session.abstract_text.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceMatch {
    pub name: String,
    pub session_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryValue {
    pub name: String,
    pub count: usize,
    /// Share of all sessions, formatted with two decimals.
    pub percentage: String,
}

/// Display form of a participant record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeakerCard {
    pub name: String,
    #[serde(rename = "jobTitle")]
    pub job_title: Option<String>,
    pub company: Option<String>,
    pub role: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpeakerSession {
    pub code: Option<String>,
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeakerProfile {
    #[serde(flatten)]
    pub card: SpeakerCard,
    pub sessions: Vec<SpeakerSession>,
}

/// Session as shown by `session show`: catalog bookkeeping fields removed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionDetails {
    pub code: Option<String>,
    pub title: Option<String>,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    #[serde(rename = "type")]
    pub session_type: Option<String>,
    pub attributes: Attributes,
    pub speakers: Vec<SpeakerCard>,
}

/// Category keys accepted by [`SessionQuery::list_categories`].
pub const CATEGORY_KEYS: [(&str, Category); 9] = [
    ("topics", Category::Topics),
    ("services", Category::Services),
    ("industries", Category::Industries),
    ("roles", Category::Roles),
    ("levels", Category::Level),
    ("segments", Category::Segments),
    ("areas_of_interest", Category::AreasOfInterest),
    ("features", Category::Features),
    ("types", Category::Type),
];

pub fn category_for_key(key: &str) -> Option<Category> {
    CATEGORY_KEYS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, category)| *category)
}

/// Full level label for a numeric shorthand such as `"300"`.
pub fn level_label(shorthand: &str) -> Option<&'static str> {
    match shorthand.trim() {
        "100" => Some("100 – Foundational"),
        "200" => Some("200 – Intermediate"),
        "300" => Some("300 – Advanced"),
        "400" => Some("400 – Expert"),
        "500" => Some("500 – Distinguished"),
        _ => None,
    }
}

pub struct SessionQuery<'a> {
    sessions: &'a [Session],
}

impl<'a> SessionQuery<'a> {
    pub fn new(sessions: &'a [Session]) -> Self {
        Self { sessions }
    }

    /// Case-insensitive match on title, abstract or speaker name.
    /// A blank query returns every session; otherwise the query is matched
    /// as given, surrounding whitespace included.
    pub fn search_sessions(&self, query: &str, page: &Page) -> Paged<SessionSummary> {
        let match_all = query.trim().is_empty();
        let needle = query.to_lowercase();
        let results = self
            .sessions
            .iter()
            .filter(|s| {
                match_all
                    || contains_ci(s.title.as_deref(), &needle)
                    || contains_ci(s.abstract_text.as_deref(), &needle)
                    || s.speakers
                        .iter()
                        .filter_map(speaker_card)
                        .any(|card| card.name.to_lowercase().contains(&needle))
            })
            .map(SessionSummary::from)
            .collect();

        paginate(results, page)
    }

    pub fn search_services(&self, query: &str, page: &Page) -> Paged<ServiceMatch> {
        let needle = query.to_lowercase();
        let results = self
            .distinct_values(Category::Services)
            .into_iter()
            .filter(|service| service.to_lowercase().contains(&needle))
            .map(|service| ServiceMatch {
                session_count: self.count_sessions_with(Category::Services, service),
                name: service.to_string(),
            })
            .collect();

        paginate(results, page)
    }

    pub fn session_details(&self, code: &str) -> Option<SessionDetails> {
        let session = self
            .sessions
            .iter()
            .find(|s| s.code.as_deref() == Some(code))?;

        Some(SessionDetails {
            code: session.code.clone(),
            title: session.title.clone(),
            abstract_text: session.abstract_text.clone(),
            session_type: session.session_type.clone(),
            attributes: session.attributes.clone(),
            speakers: session.speakers.iter().filter_map(speaker_card).collect(),
        })
    }

    /// Distinct values of a category with presence counts.
    /// Unknown keys yield an empty list.
    pub fn list_categories(&self, key: &str) -> Vec<CategoryValue> {
        let Some(category) = category_for_key(key) else {
            return Vec::new();
        };
        let total = self.sessions.len();

        self.distinct_values(category)
            .into_iter()
            .map(|value| {
                let count = self.count_sessions_with(category, value);
                CategoryValue {
                    name: value.to_string(),
                    count,
                    percentage: format!("{:.2}", count as f64 / total as f64 * 100.0),
                }
            })
            .collect()
    }

    pub fn sessions_by(&self, category: Category, value: &str, page: &Page) -> Paged<SessionSummary> {
        let results = self
            .sessions
            .iter()
            .filter(|s| s.attributes.contains(category, value))
            .map(SessionSummary::from)
            .collect();

        paginate(results, page)
    }

    /// Sessions at a level given by its numeric shorthand (`"100"`..`"500"`).
    pub fn sessions_by_level(&self, shorthand: &str, page: &Page) -> Paged<SessionSummary> {
        match level_label(shorthand) {
            Some(label) => self.sessions_by(Category::Level, label, page),
            None => paginate(Vec::new(), page),
        }
    }

    /// Every named speaker with the sessions they appear in, first-seen order.
    pub fn all_speakers(&self) -> Vec<SpeakerProfile> {
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut profiles: Vec<SpeakerProfile> = Vec::new();

        for session in self.sessions {
            for card in session.speakers.iter().filter_map(speaker_card) {
                let pos = match index.get(&card.name) {
                    Some(&pos) => pos,
                    None => {
                        index.insert(card.name.clone(), profiles.len());
                        profiles.push(SpeakerProfile {
                            card,
                            sessions: Vec::new(),
                        });
                        profiles.len() - 1
                    }
                };
                profiles[pos].sessions.push(SpeakerSession {
                    code: session.code.clone(),
                    title: session.title.clone(),
                });
            }
        }

        profiles
    }

    pub fn search_speakers(&self, name: &str, page: &Page) -> Paged<SpeakerProfile> {
        let match_all = name.trim().is_empty();
        let needle = name.to_lowercase();
        let results = self
            .all_speakers()
            .into_iter()
            .filter(|p| match_all || p.card.name.to_lowercase().contains(&needle))
            .collect();

        paginate(results, page)
    }

    fn distinct_values(&self, category: Category) -> Vec<&'a str> {
        let mut seen = HashSet::new();
        self.sessions
            .iter()
            .flat_map(|s| s.values(category).iter().map(String::as_str))
            .filter(|v| seen.insert(*v))
            .collect()
    }

    fn count_sessions_with(&self, category: Category, value: &str) -> usize {
        self.sessions
            .iter()
            .filter(|s| s.attributes.contains(category, value))
            .count()
    }
}

fn contains_ci(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|h| h.to_lowercase().contains(needle))
}

/// Interpret a participant record. Bare strings are names; objects use the
/// catalog's name fields in priority order and are skipped when nameless.
pub fn speaker_card(value: &Value) -> Option<SpeakerCard> {
    match value {
        Value::String(name) => Some(SpeakerCard {
            name: name.clone(),
            job_title: None,
            company: None,
            role: None,
        }),
        Value::Object(fields) => {
            let text = |key: &str| {
                fields
                    .get(key)
                    .and_then(Value::as_str)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
            };

            let name = text("fullName").or_else(|| text("globalFullName")).or_else(|| {
                let joined = format!(
                    "{} {}",
                    text("firstName").unwrap_or_default(),
                    text("lastName").unwrap_or_default()
                );
                Some(joined.trim().to_string()).filter(|n| !n.is_empty())
            })?;

            Some(SpeakerCard {
                name,
                job_title: text("jobTitle").or_else(|| text("globalJobtitle")),
                company: text("companyName").or_else(|| text("globalCompany")),
                role: fields.get("roles").filter(|r| !r.is_null()).cloned(),
            })
        }
        _ => None,
    }
}
