use super::collect::{self, CollectResult};
use super::report::{self, ReportResult};
use super::HandlerContext;
use crate::args::SourceArgs;
use crate::views;
use anyhow::Result;
use confcat_types::Category;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct PipelineResult {
    pub collect: CollectResult,
    pub report: ReportResult,
}

/// Normalize everything, then report each of the nine categories.
pub fn handle(ctx: &HandlerContext, source: &SourceArgs) -> Result<()> {
    let (sessions, collect) = collect::execute(ctx, source)?;
    let report = report::execute(ctx, &sessions, &Category::ALL)?;

    ctx.emit(&PipelineResult { collect, report }, |result| {
        views::print_collect(&result.collect);
        println!();
        views::print_report(&result.report);
    })
}
