use super::HandlerContext;
use crate::views;
use anyhow::{Result, anyhow};
use confcat_engine::{Page, SessionQuery};

pub fn search(ctx: &HandlerContext, query: &str, page: &Page) -> Result<()> {
    let sessions = ctx.load_sessions()?;
    let results = SessionQuery::new(&sessions).search_sessions(query, page);
    ctx.emit(&results, views::print_session_list)
}

pub fn show(ctx: &HandlerContext, code: &str) -> Result<()> {
    let sessions = ctx.load_sessions()?;
    let details = SessionQuery::new(&sessions)
        .session_details(code)
        .ok_or_else(|| anyhow!("Session not found: {}", code))?;
    ctx.emit(&details, views::print_session_details)
}
