use crate::{Error, Result};
use confcat_types::Session;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

pub const JSON_FILE: &str = "sessions.json";
pub const MSGPACK_FILE: &str = "sessions.msgpack";

/// Encoding of a sessions store file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreFormat {
    Json,
    Msgpack,
}

impl StoreFormat {
    /// Format implied by a file extension; anything but `.msgpack` is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("msgpack") | Some("mpk") => StoreFormat::Msgpack,
            _ => StoreFormat::Json,
        }
    }

    pub fn encode(&self, sessions: &[Session]) -> Result<Vec<u8>> {
        match self {
            StoreFormat::Json => Ok(serde_json::to_vec_pretty(sessions)?),
            // Named fields keep the binary form readable by other msgpack consumers
            StoreFormat::Msgpack => Ok(rmp_serde::to_vec_named(sessions)?),
        }
    }

    pub fn decode(&self, bytes: &[u8]) -> Result<Vec<Session>> {
        match self {
            StoreFormat::Json => Ok(serde_json::from_slice(bytes)?),
            StoreFormat::Msgpack => Ok(rmp_serde::from_slice(bytes)?),
        }
    }
}

/// Size comparison between the JSON store and its MessagePack encoding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EncodingReport {
    pub json_bytes: u64,
    pub msgpack_bytes: u64,
    /// `(1 - msgpack / json) * 100`
    pub reduction_percent: f64,
}

impl EncodingReport {
    pub fn new(json_bytes: u64, msgpack_bytes: u64) -> Self {
        let reduction_percent = if json_bytes == 0 {
            0.0
        } else {
            (1.0 - msgpack_bytes as f64 / json_bytes as f64) * 100.0
        };
        Self {
            json_bytes,
            msgpack_bytes,
            reduction_percent,
        }
    }
}

/// The persisted session collection inside a data directory.
#[derive(Debug, Clone)]
pub struct SessionStore {
    root: PathBuf,
}

impl SessionStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn json_path(&self) -> PathBuf {
        self.root.join(JSON_FILE)
    }

    pub fn msgpack_path(&self) -> PathBuf {
        self.root.join(MSGPACK_FILE)
    }

    pub fn exists(&self) -> bool {
        self.json_path().exists() || self.msgpack_path().exists()
    }

    pub fn save(&self, sessions: &[Session]) -> Result<PathBuf> {
        let path = self.json_path();
        write_sessions(&path, sessions, StoreFormat::Json)?;
        info!(path = %path.display(), sessions = sessions.len(), "saved sessions");
        Ok(path)
    }

    /// Load the collection, preferring the JSON form when both exist.
    pub fn load(&self) -> Result<Vec<Session>> {
        let json = self.json_path();
        if json.exists() {
            return read_sessions(&json);
        }
        let msgpack = self.msgpack_path();
        if msgpack.exists() {
            return read_sessions(&msgpack);
        }
        Err(Error::at(
            json,
            Error::Format("no sessions store found; run `confcat collect` first".to_string()),
        ))
    }

    /// Re-encode the JSON store as MessagePack and compare sizes.
    pub fn encode_msgpack(&self) -> Result<EncodingReport> {
        let json = self.json_path();
        let sessions = read_sessions(&json)?;
        let msgpack = self.msgpack_path();
        write_sessions(&msgpack, &sessions, StoreFormat::Msgpack)?;

        let size = |path: &Path| -> Result<u64> {
            Ok(std::fs::metadata(path)
                .map_err(|e| Error::at(path, e))?
                .len())
        };
        let report = EncodingReport::new(size(&json)?, size(&msgpack)?);
        info!(
            json_bytes = report.json_bytes,
            msgpack_bytes = report.msgpack_bytes,
            reduction = format!("{:.1}%", report.reduction_percent),
            "created MessagePack store"
        );
        Ok(report)
    }
}

pub fn write_sessions(path: &Path, sessions: &[Session], format: StoreFormat) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::at(parent, e))?;
    }
    let bytes = format.encode(sessions).map_err(|e| Error::at(path, e))?;
    std::fs::write(path, bytes).map_err(|e| Error::at(path, e))
}

pub fn read_sessions(path: &Path) -> Result<Vec<Session>> {
    let bytes = std::fs::read(path).map_err(|e| Error::at(path, e))?;
    StoreFormat::from_path(path)
        .decode(&bytes)
        .map_err(|e| Error::at(path, e))
}
