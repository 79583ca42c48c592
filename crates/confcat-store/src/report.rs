use crate::{Error, Result};
use confcat_engine::{CategoryReport, ReportSink};
use confcat_types::Category;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DISTRIBUTION_FILE: &str = "distribution.csv";
const LISTING_SUFFIX: &str = "_sessions.csv";

/// Writes category reports as CSV files under `<root>/<category>/`.
///
/// Each write replaces the category's previous report files, and a category
/// with no report this run loses its old ones, so a rerun never leaves
/// listings for values that disappeared.
#[derive(Debug, Clone)]
pub struct CsvReportSink {
    root: PathBuf,
    written: Vec<PathBuf>,
}

impl CsvReportSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            written: Vec::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Files written so far, in write order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn clear_previous(&self, dir: &Path) -> std::io::Result<()> {
        if !dir.is_dir() {
            return Ok(());
        }
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
            if path.is_file() && (name == DISTRIBUTION_FILE || name.ends_with(LISTING_SUFFIX)) {
                std::fs::remove_file(&path)?;
            }
        }
        Ok(())
    }

    fn record(&mut self, path: PathBuf) {
        // Overwriting slugs write the same file more than once
        if !self.written.contains(&path) {
            self.written.push(path);
        }
    }
}

impl ReportSink for CsvReportSink {
    type Error = Error;

    fn write_report(&mut self, report: &CategoryReport) -> Result<()> {
        let category = report.category;
        let dir = self.root.join(category.as_str());
        let fail = |path: &Path, source: Error| Error::Report {
            category,
            path: path.to_path_buf(),
            source: Box::new(source),
        };

        self.clear_previous(&dir).map_err(|e| fail(&dir, e.into()))?;
        std::fs::create_dir_all(&dir).map_err(|e| fail(&dir, e.into()))?;

        let path = dir.join(DISTRIBUTION_FILE);
        write_distribution(&path, report).map_err(|e| fail(&path, e))?;
        self.record(path);

        for listing in &report.listings {
            let path = dir.join(format!("{}{}", listing.slug, LISTING_SUFFIX));
            write_listing(&path, listing).map_err(|e| fail(&path, e))?;
            debug!(path = %path.display(), sessions = listing.entries.len(), "wrote listing");
            self.record(path);
        }

        Ok(())
    }

    fn clear(&mut self, category: Category) -> Result<()> {
        let dir = self.root.join(category.as_str());
        let fail = |source: std::io::Error| Error::Report {
            category,
            path: dir.clone(),
            source: Box::new(source.into()),
        };

        self.clear_previous(&dir).map_err(fail)?;
        // Leave the directory only if something else lives there
        if dir.is_dir() && std::fs::read_dir(&dir).map_err(fail)?.next().is_none() {
            std::fs::remove_dir(&dir).map_err(fail)?;
            debug!(dir = %dir.display(), "removed stale report directory");
        }
        Ok(())
    }
}

fn write_distribution(path: &Path, report: &CategoryReport) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([report.category.value_label(), "session_count", "percentage"])?;
    for row in &report.rows {
        wtr.write_record([
            row.value.as_str(),
            &row.session_count.to_string(),
            &format!("{:.2}", row.percentage),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

fn write_listing(path: &Path, listing: &confcat_engine::ValueListing) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(["code", "title", "type"])?;
    for entry in &listing.entries {
        wtr.write_record([
            entry.code.as_deref().unwrap_or(""),
            entry.title.as_deref().unwrap_or(""),
            entry.session_type.as_deref().unwrap_or(""),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
