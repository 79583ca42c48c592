use crate::slug::{SlugPolicy, assign_slugs};
use crate::{Error, Result};
use confcat_types::{Category, Session};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{info, warn};

/// Frequency of one value within a category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionRow {
    pub value: String,
    pub session_count: usize,
    /// `session_count / total sessions * 100`, rounded to 2 decimals.
    pub percentage: f64,
}

/// Session reference inside a cross-reference listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrossReferenceEntry {
    pub code: Option<String>,
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub session_type: Option<String>,
}

impl From<&Session> for CrossReferenceEntry {
    fn from(session: &Session) -> Self {
        Self {
            code: session.code.clone(),
            title: session.title.clone(),
            session_type: session.session_type.clone(),
        }
    }
}

/// Sessions listing one value, addressed by the value's slug.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueListing {
    pub value: String,
    pub slug: String,
    pub entries: Vec<CrossReferenceEntry>,
}

/// Full report for one category: distribution table plus one listing per value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryReport {
    pub category: Category,
    pub total_sessions: usize,
    pub total_occurrences: usize,
    pub rows: Vec<DistributionRow>,
    pub listings: Vec<ValueListing>,
}

/// Every value of `category` across all sessions, concatenated.
///
/// A session listing the same value twice contributes it twice.
pub fn flatten_values(sessions: &[Session], category: Category) -> Vec<&str> {
    sessions
        .iter()
        .flat_map(|s| s.values(category).iter().map(String::as_str))
        .collect()
}

/// Distribution rows ordered by descending count; ties keep first-encounter order.
pub fn distribution(sessions: &[Session], category: Category) -> Vec<DistributionRow> {
    let total_sessions = sessions.len();
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, usize)> = Vec::new();

    for value in flatten_values(sessions, category) {
        match index.get(value) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(value, counts.len());
                counts.push((value, 1));
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));

    counts
        .into_iter()
        .map(|(value, count)| DistributionRow {
            value: value.to_string(),
            session_count: count,
            percentage: percentage(count, total_sessions),
        })
        .collect()
}

/// Sessions whose `category` contains `value`, in collection order.
pub fn cross_reference(
    sessions: &[Session],
    category: Category,
    value: &str,
) -> Vec<CrossReferenceEntry> {
    sessions
        .iter()
        .filter(|s| s.attributes.contains(category, value))
        .map(CrossReferenceEntry::from)
        .collect()
}

/// Build the report for one category.
///
/// Returns `Ok(None)` when no session carries a value in the category.
pub fn aggregate_category(
    sessions: &[Session],
    category: Category,
    policy: SlugPolicy,
) -> Result<Option<CategoryReport>> {
    let rows = distribution(sessions, category);
    if rows.is_empty() {
        return Ok(None);
    }

    let values: Vec<&str> = rows.iter().map(|r| r.value.as_str()).collect();
    let slugs = assign_slugs(category, &values, policy)?;

    let listings = rows
        .iter()
        .zip(slugs)
        .map(|(row, slug)| ValueListing {
            value: row.value.clone(),
            slug,
            entries: cross_reference(sessions, category, &row.value),
        })
        .collect();

    Ok(Some(CategoryReport {
        category,
        total_sessions: sessions.len(),
        total_occurrences: rows.iter().map(|r| r.session_count).sum(),
        rows,
        listings,
    }))
}

fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let raw = count as f64 / total as f64 * 100.0;
    (raw * 100.0).round() / 100.0
}

/// Destination for category reports.
pub trait ReportSink {
    type Error;

    fn write_report(&mut self, report: &CategoryReport) -> std::result::Result<(), Self::Error>;

    /// Drop whatever an earlier run wrote for `category`. Called when the
    /// category produces no report this run.
    fn clear(&mut self, _category: Category) -> std::result::Result<(), Self::Error> {
        Ok(())
    }
}

/// What happened to each category of a batch run.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub reported: Vec<(Category, usize)>,
    pub empty: Vec<Category>,
    pub failed: Vec<(Category, Error)>,
}

/// Aggregate each category independently and hand every report to `sink`.
///
/// Empty categories and slug collisions are recorded in the summary and the
/// batch moves on; a sink error aborts the run.
pub fn run_batch<S: ReportSink>(
    sessions: &[Session],
    categories: &[Category],
    policy: SlugPolicy,
    sink: &mut S,
) -> std::result::Result<BatchSummary, S::Error> {
    let mut summary = BatchSummary::default();

    for &category in categories {
        match aggregate_category(sessions, category, policy) {
            Ok(Some(report)) => {
                sink.write_report(&report)?;
                info!(
                    %category,
                    unique_values = report.rows.len(),
                    "processed category"
                );
                summary.reported.push((category, report.rows.len()));
            }
            Ok(None) => {
                sink.clear(category)?;
                info!(%category, "no data found for category");
                summary.empty.push(category);
            }
            Err(err) => {
                sink.clear(category)?;
                warn!(%category, error = %err, "skipping category");
                summary.failed.push((category, err));
            }
        }
    }

    Ok(summary)
}
