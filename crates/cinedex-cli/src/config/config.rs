//! `AppConfig` struct and TOML read.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level application configuration.
#[derive(Debug, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Discovery defaults.
    #[serde(default)]
    pub discovery: DiscoveryConfig,
    /// API client settings.
    #[serde(default)]
    pub api: ApiConfig,
}

/// Discovery defaults applied when CLI flags are omitted.
#[derive(Debug, Deserialize, Default, PartialEq, Eq)]
pub struct DiscoveryConfig {
    /// Default sort order (TMDB wire string, e.g. "vote_average.desc").
    #[serde(default)]
    pub sort_by: Option<String>,
}

/// API client configuration.
#[derive(Debug, Deserialize, Default, PartialEq, Eq)]
pub struct ApiConfig {
    /// Response language (default: "en-US").
    #[serde(default)]
    pub language: Option<String>,
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }
}
