use super::HandlerContext;
use crate::args::SourceArgs;
use crate::views;
use anyhow::{Result, bail};
use confcat_engine::QualityReport;
use confcat_store::{CaptureDirSource, EncodingReport, RawFileSource, SessionSource};
use confcat_types::Session;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Serialize)]
pub struct CollectResult {
    pub store: PathBuf,
    pub quality: QualityReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<EncodingReport>,
}

pub fn handle(ctx: &HandlerContext, source: &SourceArgs) -> Result<()> {
    let (_, result) = execute(ctx, source)?;
    ctx.emit(&result, views::print_collect)
}

/// Normalize the source into the sessions store and return the stored collection.
pub fn execute(ctx: &HandlerContext, source: &SourceArgs) -> Result<(Vec<Session>, CollectResult)> {
    let raw = match (&source.raw, &source.captures) {
        (Some(path), _) => RawFileSource::new(path).collect()?,
        (None, Some(dir)) => {
            CaptureDirSource::new(dir, &ctx.config.capture.endpoint_pattern)?.collect()?
        }
        (None, None) => bail!("either --raw or --captures is required"),
    };

    let (sessions, quality) = confcat_engine::collect_sessions(&raw);
    quality.log();

    let store = ctx.store();
    let path = store.save(&sessions)?;
    let encoding = if ctx.config.store.write_msgpack {
        Some(store.encode_msgpack()?)
    } else {
        None
    };

    Ok((
        sessions,
        CollectResult {
            store: path,
            quality,
            encoding,
        },
    ))
}
