use super::HandlerContext;
use crate::views;
use anyhow::Result;
use confcat_engine::run_batch;
use confcat_store::CsvReportSink;
use confcat_types::{Category, Session};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Serialize)]
pub struct ReportedCategory {
    pub category: Category,
    pub unique_values: usize,
}

#[derive(Debug, Serialize)]
pub struct FailedCategory {
    pub category: Category,
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct ReportResult {
    pub reports_dir: PathBuf,
    pub total_sessions: usize,
    pub reported: Vec<ReportedCategory>,
    pub empty: Vec<Category>,
    pub failed: Vec<FailedCategory>,
    pub files_written: usize,
}

pub fn handle(ctx: &HandlerContext, category: Option<Category>) -> Result<()> {
    let sessions = ctx.load_sessions()?;
    let categories = match category {
        Some(category) => vec![category],
        None => Category::ALL.to_vec(),
    };

    let result = execute(ctx, &sessions, &categories)?;
    ctx.emit(&result, views::print_report)
}

pub fn execute(
    ctx: &HandlerContext,
    sessions: &[Session],
    categories: &[Category],
) -> Result<ReportResult> {
    let mut sink = CsvReportSink::new(ctx.reports_dir());
    let summary = run_batch(
        sessions,
        categories,
        ctx.config.reports.slug_collisions,
        &mut sink,
    )?;

    Ok(ReportResult {
        reports_dir: sink.root().to_path_buf(),
        total_sessions: sessions.len(),
        reported: summary
            .reported
            .into_iter()
            .map(|(category, unique_values)| ReportedCategory {
                category,
                unique_values,
            })
            .collect(),
        empty: summary.empty,
        failed: summary
            .failed
            .into_iter()
            .map(|(category, err)| FailedCategory {
                category,
                error: err.to_string(),
            })
            .collect(),
        files_written: sink.written().len(),
    })
}
