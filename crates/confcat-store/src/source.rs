use crate::{Error, Result};
use confcat_types::RawSession;
use regex::Regex;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Producer of the completed raw session sequence.
///
/// The collector behind a source (browser automation, pagination, response
/// interception) is finished by the time `collect` returns.
pub trait SessionSource {
    fn collect(&self) -> Result<Vec<RawSession>>;
}

impl<F> SessionSource for F
where
    F: Fn() -> Result<Vec<RawSession>>,
{
    fn collect(&self) -> Result<Vec<RawSession>> {
        self()
    }
}

/// A JSON file holding either an array of raw items or a single search
/// response body.
pub struct RawFileSource {
    path: PathBuf,
}

impl RawFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SessionSource for RawFileSource {
    fn collect(&self) -> Result<Vec<RawSession>> {
        let value = read_json(&self.path)?;
        let items = match value {
            Value::Array(items) => items,
            body @ Value::Object(_) => extract_items(&body).ok_or_else(|| {
                Error::at(
                    &self.path,
                    Error::Format("not a successful search response".to_string()),
                )
            })?,
            _ => {
                return Err(Error::at(
                    &self.path,
                    Error::Format("expected an array of sessions".to_string()),
                ));
            }
        };

        let sessions = to_raw_sessions(items);
        info!(path = %self.path.display(), count = sessions.len(), "loaded raw sessions");
        Ok(sessions)
    }
}

/// Directory of captured catalog API responses.
///
/// Each `*.json` file is a response body, or an envelope
/// `{"url": ..., "body": ...}` whose URL must match the endpoint pattern.
/// Files are read in sorted path order so collection is deterministic.
pub struct CaptureDirSource {
    dir: PathBuf,
    endpoint: Regex,
}

impl CaptureDirSource {
    pub fn new(dir: impl Into<PathBuf>, endpoint_pattern: &str) -> Result<Self> {
        Ok(Self {
            dir: dir.into(),
            endpoint: Regex::new(endpoint_pattern)?,
        })
    }

    fn response_body<'v>(&self, path: &Path, capture: &'v Value) -> Option<&'v Value> {
        match (capture.get("url"), capture.get("body")) {
            (Some(url), Some(body)) => {
                let url = url.as_str().unwrap_or_default();
                if self.endpoint.is_match(url) {
                    Some(body)
                } else {
                    debug!(path = %path.display(), url, "skipping capture for other endpoint");
                    None
                }
            }
            _ => Some(capture),
        }
    }
}

impl SessionSource for CaptureDirSource {
    fn collect(&self) -> Result<Vec<RawSession>> {
        let mut items = Vec::new();

        let entries = WalkDir::new(&self.dir)
            .sort_by_file_name()
            .into_iter()
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| Error::at(&self.dir, e))?;

        for entry in entries {
            let path = entry.path();
            if !entry.file_type().is_file()
                || path.extension().and_then(|e| e.to_str()) != Some("json")
            {
                continue;
            }

            let capture = match read_json(path) {
                Ok(value) => value,
                Err(err) => {
                    warn!(error = %err, "skipping unreadable capture");
                    continue;
                }
            };

            let Some(body) = self.response_body(path, &capture) else {
                continue;
            };

            match extract_items(body) {
                Some(found) => {
                    items.extend(found);
                    let total = body
                        .get("totalSearchItems")
                        .or_else(|| body.get("total"))
                        .and_then(Value::as_u64)
                        .unwrap_or(0);
                    info!(collected = items.len(), total, "captured sessions");
                }
                None => debug!(path = %path.display(), "capture is not a successful response"),
            }
        }

        Ok(to_raw_sessions(items))
    }
}

/// Session items of a successful search response.
///
/// Returns `None` unless `responseCode` is `"0"`. Items are gathered from
/// every `sectionList[].items` when a section list is present, otherwise
/// from the top-level `items`.
pub fn extract_items(body: &Value) -> Option<Vec<Value>> {
    let ok = match body.get("responseCode") {
        Some(Value::String(code)) => code == "0",
        Some(Value::Number(code)) => code.as_u64() == Some(0),
        _ => false,
    };
    if !ok {
        return None;
    }

    let items_of = |v: &Value| -> Vec<Value> {
        v.get("items")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default()
    };

    if let Some(sections) = body.get("sectionList") {
        let sections = sections.as_array().map(Vec::as_slice).unwrap_or_default();
        Some(sections.iter().flat_map(items_of).collect())
    } else {
        Some(items_of(body))
    }
}

fn to_raw_sessions(items: Vec<Value>) -> Vec<RawSession> {
    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<RawSession>(item) {
            Ok(raw) => Some(raw),
            Err(err) => {
                warn!(error = %err, "skipping catalog item that is not an object");
                None
            }
        })
        .collect()
}

fn read_json(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::at(path, e))?;
    serde_json::from_str(&content).map_err(|e| Error::at(path, e))
}
