use confcat_types::{AttributeKind, Attributes, RawSession, Session, value_to_label};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Map one raw catalog item to a canonical session.
///
/// Never fails: missing or mistyped fields become `None`, attribute
/// entries with an unknown kind or without a usable value are dropped.
pub fn normalize_session(raw: &RawSession) -> Session {
    let label = |field: &Option<serde_json::Value>| field.as_ref().and_then(value_to_label);
    let passthrough = |field: &Option<serde_json::Value>| field.clone().filter(|v| !v.is_null());

    let mut attributes = Attributes::default();
    for attr in raw.attributes() {
        let Some(kind) = AttributeKind::from_token(&attr.kind) else {
            continue;
        };
        match attr.value.as_ref().and_then(value_to_label) {
            Some(value) => attributes.push(kind.category(), value),
            None => debug!(kind = kind.token(), "attribute entry without a value"),
        }
    }

    Session {
        code: label(&raw.code),
        title: label(&raw.title),
        abstract_text: label(&raw.abstract_text),
        session_type: label(&raw.session_type),
        length: label(&raw.length),
        session_id: label(&raw.session_id),
        event_id: passthrough(&raw.event_id),
        published: passthrough(&raw.published),
        modified: passthrough(&raw.modified),
        attributes,
        speakers: raw.participants(),
    }
}

pub fn normalize_all(raw: &[RawSession]) -> Vec<Session> {
    raw.iter().map(normalize_session).collect()
}

/// Outcome of collapsing sessions by identity.
#[derive(Debug, Clone, Default)]
pub struct Deduplicated {
    /// One session per distinct id, in first-seen position.
    pub sessions: Vec<Session>,
    /// Records dropped because they had no (or an empty) session id.
    pub missing_identity: usize,
    /// Records that overwrote an earlier record with the same id.
    pub replaced: usize,
}

/// Collapse sessions sharing a `sessionId`, last write wins.
///
/// A replaced session keeps the position of the first record seen with its
/// id. Sessions without an id cannot be keyed and are dropped.
pub fn dedupe_sessions(sessions: Vec<Session>) -> Deduplicated {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut result = Deduplicated::default();

    for session in sessions {
        let Some(id) = session.identity().map(str::to_string) else {
            result.missing_identity += 1;
            continue;
        };

        match positions.get(&id) {
            Some(&pos) => {
                result.sessions[pos] = session;
                result.replaced += 1;
            }
            None => {
                positions.insert(id, result.sessions.len());
                result.sessions.push(session);
            }
        }
    }

    if result.missing_identity > 0 {
        warn!(
            dropped = result.missing_identity,
            "dropped sessions without a session id"
        );
    }
    debug!(
        unique = result.sessions.len(),
        replaced = result.replaced,
        "deduplicated sessions"
    );

    result
}

/// Data quality counters for a collection run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QualityReport {
    pub total_sessions: usize,
    pub missing_identity: usize,
    pub replaced_duplicates: usize,
    pub missing_title: usize,
    pub missing_abstract: usize,
}

impl QualityReport {
    pub fn new(deduped: &Deduplicated) -> Self {
        let blank = |field: &Option<String>| field.as_deref().is_none_or(str::is_empty);

        Self {
            total_sessions: deduped.sessions.len(),
            missing_identity: deduped.missing_identity,
            replaced_duplicates: deduped.replaced,
            missing_title: deduped.sessions.iter().filter(|s| blank(&s.title)).count(),
            missing_abstract: deduped
                .sessions
                .iter()
                .filter(|s| blank(&s.abstract_text))
                .count(),
        }
    }

    pub fn log(&self) {
        info!(
            total = self.total_sessions,
            missing_identity = self.missing_identity,
            replaced = self.replaced_duplicates,
            missing_title = self.missing_title,
            missing_abstract = self.missing_abstract,
            "collected sessions"
        );
    }
}
