use super::HandlerContext;
use crate::views;
use anyhow::Result;
use confcat_engine::{CATEGORY_KEYS, Page, SessionQuery, category_for_key, level_label};
use confcat_types::Category;
use tracing::warn;

pub fn list(ctx: &HandlerContext, key: &str) -> Result<()> {
    if category_for_key(key).is_none() {
        let keys: Vec<&str> = CATEGORY_KEYS.iter().map(|(k, _)| *k).collect();
        warn!(key, expected = %keys.join(", "), "unknown category key");
    }

    let sessions = ctx.load_sessions()?;
    let values = SessionQuery::new(&sessions).list_categories(key);
    ctx.emit(&values, |values| views::print_category_values(values))
}

pub fn sessions(ctx: &HandlerContext, category: Category, value: &str, page: &Page) -> Result<()> {
    let sessions = ctx.load_sessions()?;
    let results = SessionQuery::new(&sessions).sessions_by(category, value, page);
    ctx.emit(&results, views::print_session_list)
}

pub fn level(ctx: &HandlerContext, level: &str, page: &Page) -> Result<()> {
    if level_label(level).is_none() {
        warn!(level, "unknown level shorthand (expected 100, 200, 300, 400 or 500)");
    }

    let sessions = ctx.load_sessions()?;
    let results = SessionQuery::new(&sessions).sessions_by_level(level, page);
    ctx.emit(&results, views::print_session_list)
}
