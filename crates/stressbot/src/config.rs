//! Project configuration file support for stressbot.
//!
//! Loads configuration from `stressbot.toml` in the working directory.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Project-level configuration loaded from `stressbot.toml`
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Study/model tag written into each result row
    pub study: Option<String>,
    /// Text-generation backend ("openai" or "canned")
    pub generator: Option<String>,
    /// Model passed to the generation API
    pub model: Option<String>,
    /// Base URL of the OpenAI-compatible API
    pub api_base: Option<String>,
    /// Per-request timeout in seconds
    pub timeout_secs: Option<u64>,
    /// CSV file completed sessions are appended to
    pub output: Option<String>,
    /// Whether to reword inventory items via the generator
    pub rephrase: Option<bool>,
}

/// The config file name
pub const CONFIG_FILE_NAME: &str = "stressbot.toml";

impl ProjectConfig {
    /// Load configuration from the working directory.
    ///
    /// Returns:
    /// - `Ok(Some(config))` if file exists and parses successfully
    /// - `Ok(None)` if file does not exist
    /// - `Err(...)` if file exists but fails to parse (hard error)
    pub fn load(working_dir: &Path) -> Result<Option<Self>> {
        let config_path = working_dir.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let config: ProjectConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        Ok(Some(config))
    }
}
