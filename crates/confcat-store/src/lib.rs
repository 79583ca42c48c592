pub mod error;
pub mod report;
pub mod source;
pub mod store;

pub use error::{Error, Result};
pub use report::CsvReportSink;
pub use source::{CaptureDirSource, RawFileSource, SessionSource, extract_items};
pub use store::{EncodingReport, SessionStore, StoreFormat};
