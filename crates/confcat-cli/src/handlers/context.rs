use crate::config::{CONFIG_FILE, Config};
use crate::types::OutputFormat;
use anyhow::Result;
use confcat_store::SessionStore;
use confcat_types::Session;
use serde::Serialize;
use std::path::PathBuf;

/// Everything a handler needs: resolved data directory, config and output format
pub struct HandlerContext {
    pub data_dir: PathBuf,
    pub config: Config,
    pub format: OutputFormat,
}

impl HandlerContext {
    pub fn load(data_dir: PathBuf, format: OutputFormat) -> Result<Self> {
        let config = Config::load_from(&data_dir.join(CONFIG_FILE))?;
        Ok(Self {
            data_dir,
            config,
            format,
        })
    }

    pub fn store(&self) -> SessionStore {
        SessionStore::new(&self.data_dir)
    }

    pub fn reports_dir(&self) -> PathBuf {
        self.config.reports_dir(&self.data_dir)
    }

    pub fn load_sessions(&self) -> Result<Vec<Session>> {
        Ok(self.store().load()?)
    }

    /// Print `value` as JSON, or hand it to `plain` for human output
    pub fn emit<T: Serialize>(&self, value: &T, plain: impl FnOnce(&T)) -> Result<()> {
        if self.format.is_json() {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            plain(value);
        }
        Ok(())
    }
}
