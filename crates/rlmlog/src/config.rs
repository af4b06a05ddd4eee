//! Configuration file support for rlmlog.
//!
//! Loads `rlmlog.toml` from the working directory, falling back to the user
//! config directory.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// The config file name
pub const CONFIG_FILE_NAME: &str = "rlmlog.toml";

/// Settings loaded from `rlmlog.toml`
#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RlmlogConfig {
    /// Render events at all
    pub enabled: Option<bool>,
    /// Rendering mode
    pub mode: Option<ModeSetting>,
    /// Filter for rlmlog's own diagnostics (tracing directive syntax)
    pub log_level: Option<String>,
}

/// How the rendering mode is chosen
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ModeSetting {
    /// Detect from the terminal
    #[default]
    Auto,
    Plain,
    Enhanced,
}

impl RlmlogConfig {
    /// Load configuration for `working_dir`.
    ///
    /// Returns:
    /// - `Ok(Some(config))` if a config file exists and parses successfully
    /// - `Ok(None)` if there is no config file
    /// - `Err(...)` if a file exists but fails to parse (hard error)
    pub fn load(working_dir: &Path) -> Result<Option<Self>> {
        match Self::find(working_dir) {
            Some(path) => Self::load_from(&path).map(Some),
            None => Ok(None),
        }
    }

    /// Parse a specific config file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let config: RlmlogConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        Ok(config)
    }

    /// Locate the config file: working directory first, then `<config dir>/rlmlog/`
    fn find(working_dir: &Path) -> Option<PathBuf> {
        let local = working_dir.join(CONFIG_FILE_NAME);
        if local.exists() {
            return Some(local);
        }

        dirs::config_dir()
            .map(|dir| dir.join("rlmlog").join(CONFIG_FILE_NAME))
            .filter(|path| path.exists())
    }
}
