use super::HandlerContext;
use crate::views;
use anyhow::Result;
use confcat_engine::{Page, SessionQuery};

pub fn search(ctx: &HandlerContext, query: &str, page: &Page) -> Result<()> {
    let sessions = ctx.load_sessions()?;
    let results = SessionQuery::new(&sessions).search_services(query, page);
    ctx.emit(&results, views::print_services)
}
