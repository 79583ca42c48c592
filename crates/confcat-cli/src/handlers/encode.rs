use super::HandlerContext;
use crate::views;
use anyhow::Result;

pub fn handle(ctx: &HandlerContext) -> Result<()> {
    let report = ctx.store().encode_msgpack()?;
    ctx.emit(&report, views::print_encoding)
}
