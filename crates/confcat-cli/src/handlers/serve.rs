use super::HandlerContext;
use crate::mcp;
use anyhow::Result;

/// Answer MCP requests on stdin/stdout until stdin closes.
pub fn handle(ctx: &HandlerContext) -> Result<()> {
    let sessions = ctx.load_sessions()?;
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    mcp::run_server(sessions, stdin.lock(), stdout.lock())
}
