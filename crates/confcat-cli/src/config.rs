use anyhow::{Context, Result, anyhow};
use confcat_engine::SlugPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "confcat.toml";
pub const DEFAULT_ENDPOINT_PATTERN: &str = r"catalog\.awsevents\.com/api/search";

/// Resolve the data directory path based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. CONFCAT_PATH environment variable (with tilde expansion)
/// 3. XDG data directory
/// 4. ~/.confcat (fallback for systems without XDG)
pub fn resolve_data_dir(explicit_path: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(path));
    }

    if let Ok(env_path) = std::env::var("CONFCAT_PATH") {
        return Ok(expand_tilde(&env_path));
    }

    if let Some(data_dir) = dirs::data_dir() {
        return Ok(data_dir.join("confcat"));
    }

    if let Some(home) = std::env::var_os("HOME") {
        return Ok(PathBuf::from(home).join(".confcat"));
    }

    Err(anyhow!(
        "Could not determine data directory: no HOME directory or XDG data directory found"
    ))
}

/// Expand tilde (~) in paths to the user's home directory
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Also write `sessions.msgpack` after every collection.
    #[serde(default = "default_true")]
    pub write_msgpack: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            write_msgpack: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportsConfig {
    /// Report root, relative to the data directory unless absolute.
    #[serde(default = "default_reports_dir")]
    pub dir: PathBuf,
    #[serde(default)]
    pub slug_collisions: SlugPolicy,
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            dir: default_reports_dir(),
            slug_collisions: SlugPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Regex a captured response URL must match to be harvested.
    #[serde(default = "default_endpoint_pattern")]
    pub endpoint_pattern: String,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            endpoint_pattern: default_endpoint_pattern(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub reports: ReportsConfig,
    #[serde(default)]
    pub capture: CaptureConfig,
}

impl Config {
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Config =
            toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn reports_dir(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.reports.dir)
    }
}

fn default_true() -> bool {
    true
}

fn default_reports_dir() -> PathBuf {
    PathBuf::from("reports")
}

fn default_endpoint_pattern() -> String {
    DEFAULT_ENDPOINT_PATTERN.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.store.write_msgpack);
        assert_eq!(config.reports.dir, PathBuf::from("reports"));
        assert_eq!(config.reports.slug_collisions, SlugPolicy::Suffix);
        assert_eq!(config.capture.endpoint_pattern, DEFAULT_ENDPOINT_PATTERN);
    }

    #[test]
    fn test_config_save_and_load() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join(CONFIG_FILE);

        let mut config = Config::default();
        config.reports.slug_collisions = SlugPolicy::Error;
        config.store.write_msgpack = false;

        config.save_to(&config_path)?;
        assert!(config_path.exists());

        let loaded = Config::load_from(&config_path)?;
        assert_eq!(loaded, config);

        Ok(())
    }

    #[test]
    fn test_partial_config_fills_defaults() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join(CONFIG_FILE);
        std::fs::write(&config_path, "[reports]\nslug_collisions = \"overwrite\"\n")?;

        let config = Config::load_from(&config_path)?;
        assert_eq!(config.reports.slug_collisions, SlugPolicy::Overwrite);
        assert_eq!(config.reports.dir, PathBuf::from("reports"));
        assert!(config.store.write_msgpack);

        Ok(())
    }

    #[test]
    fn test_load_nonexistent_returns_default() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config = Config::load_from(&temp_dir.path().join("nonexistent.toml"))?;
        assert_eq!(config, Config::default());
        Ok(())
    }

    #[test]
    fn test_absolute_reports_dir_overrides_data_dir() {
        let mut config = Config::default();
        config.reports.dir = PathBuf::from("/srv/reports");
        assert_eq!(
            config.reports_dir(Path::new("/data")),
            PathBuf::from("/srv/reports")
        );
        assert_eq!(
            Config::default().reports_dir(Path::new("/data")),
            PathBuf::from("/data/reports")
        );
    }

    #[test]
    fn test_explicit_data_dir_wins() -> Result<()> {
        assert_eq!(resolve_data_dir(Some("/tmp/cc"))?, PathBuf::from("/tmp/cc"));
        Ok(())
    }
}
