use super::HandlerContext;
use crate::config::CONFIG_FILE;
use anyhow::{Result, bail};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Serialize)]
pub struct InitResult {
    pub config: PathBuf,
    pub overwritten: bool,
}

pub fn handle(ctx: &HandlerContext, force: bool) -> Result<()> {
    let path = ctx.data_dir.join(CONFIG_FILE);
    let existed = path.exists();
    if existed && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    ctx.config.save_to(&path)?;

    let result = InitResult {
        config: path,
        overwritten: existed,
    };
    ctx.emit(&result, |r| println!("Wrote {}", r.config.display()))
}
