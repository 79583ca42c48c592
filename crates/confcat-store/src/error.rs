use confcat_types::Category;
use std::fmt;
use std::path::PathBuf;

/// Result type for confcat-store operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the store layer
#[derive(Debug)]
pub enum Error {
    /// IO operation failed
    Io(std::io::Error),

    /// JSON parsing or encoding failed
    Json(serde_json::Error),

    /// MessagePack encoding failed
    MsgpackEncode(rmp_serde::encode::Error),

    /// MessagePack decoding failed
    MsgpackDecode(rmp_serde::decode::Error),

    /// CSV writing failed
    Csv(csv::Error),

    /// Walkdir error
    WalkDir(walkdir::Error),

    /// Capture endpoint pattern is not a valid regex
    Pattern(regex::Error),

    /// Input does not have the expected shape
    Format(String),

    /// Failure reading or writing a specific file
    File { path: PathBuf, source: Box<Error> },

    /// Failure persisting part of a category report
    Report {
        category: Category,
        path: PathBuf,
        source: Box<Error>,
    },
}

impl Error {
    pub fn at(path: impl Into<PathBuf>, source: impl Into<Error>) -> Self {
        Error::File {
            path: path.into(),
            source: Box::new(source.into()),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Json(err) => write!(f, "JSON error: {}", err),
            Error::MsgpackEncode(err) => write!(f, "MessagePack encode error: {}", err),
            Error::MsgpackDecode(err) => write!(f, "MessagePack decode error: {}", err),
            Error::Csv(err) => write!(f, "CSV error: {}", err),
            Error::WalkDir(err) => write!(f, "Directory traversal error: {}", err),
            Error::Pattern(err) => write!(f, "Invalid endpoint pattern: {}", err),
            Error::Format(msg) => write!(f, "Format error: {}", msg),
            Error::File { path, source } => write!(f, "{}: {}", path.display(), source),
            Error::Report {
                category,
                path,
                source,
            } => write!(
                f,
                "Failed to write {} report file {}: {}",
                category,
                path.display(),
                source
            ),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Json(err) => Some(err),
            Error::MsgpackEncode(err) => Some(err),
            Error::MsgpackDecode(err) => Some(err),
            Error::Csv(err) => Some(err),
            Error::WalkDir(err) => Some(err),
            Error::Pattern(err) => Some(err),
            Error::File { source, .. } | Error::Report { source, .. } => Some(source.as_ref()),
            Error::Format(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}

impl From<rmp_serde::encode::Error> for Error {
    fn from(err: rmp_serde::encode::Error) -> Self {
        Error::MsgpackEncode(err)
    }
}

impl From<rmp_serde::decode::Error> for Error {
    fn from(err: rmp_serde::decode::Error) -> Self {
        Error::MsgpackDecode(err)
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Csv(err)
    }
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::WalkDir(err)
    }
}

impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Self {
        Error::Pattern(err)
    }
}
