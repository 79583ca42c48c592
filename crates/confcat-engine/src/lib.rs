// Engine module - normalization and aggregation pipeline
// This layer sits between raw catalog items (types) and the store/CLI layers

pub mod aggregate;
pub mod error;
pub mod normalize;
pub mod query;
pub mod slug;

pub use aggregate::{
    BatchSummary, CategoryReport, CrossReferenceEntry, DistributionRow, ReportSink, ValueListing,
    aggregate_category, cross_reference, distribution, flatten_values, run_batch,
};
pub use error::{Error, Result};
pub use normalize::{Deduplicated, QualityReport, dedupe_sessions, normalize_all, normalize_session};
pub use query::{
    CATEGORY_KEYS, CategoryValue, Page, Paged, ServiceMatch, SessionDetails, SessionQuery,
    SessionSummary, SpeakerCard, SpeakerProfile, SpeakerSession, category_for_key, level_label,
    speaker_card,
};
pub use slug::{SlugPolicy, assign_slugs, slugify};

use confcat_types::{RawSession, Session};

// Façade API - the full normalizer pass the CLI drives

/// Normalize every raw record and collapse duplicates by session id.
pub fn normalize_and_dedupe(raw: &[RawSession]) -> Deduplicated {
    dedupe_sessions(normalize_all(raw))
}

/// Normalize and dedupe, then summarize data quality for the run log.
pub fn collect_sessions(raw: &[RawSession]) -> (Vec<Session>, QualityReport) {
    let deduped = normalize_and_dedupe(raw);
    let report = QualityReport::new(&deduped);
    (deduped.sessions, report)
}
