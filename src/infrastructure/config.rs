// src/infrastructure/config.rs
use crate::constants::{APP_NAME, CONFIG_FILE_NAME, DEFAULT_OUTPUT_DIR, DEFAULT_OUTPUT_NOTEBOOK};
use crate::domain::RewritePolicy;
use crate::infrastructure::archive::Compression;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// TOML configuration for nbextract
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub extract: ExtractConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct OutputConfig {
    #[serde(default = "default_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_notebook")]
    pub notebook: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
pub struct ExtractConfig {
    #[serde(default)]
    pub policy: RewritePolicy,
    #[serde(default)]
    pub compression: Compression,
}

fn default_dir() -> PathBuf { PathBuf::from(DEFAULT_OUTPUT_DIR) }
fn default_notebook() -> PathBuf { PathBuf::from(DEFAULT_OUTPUT_NOTEBOOK) }

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            notebook: default_notebook(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .context("Failed to read config file")?;

        let config: Config = toml::from_str(&content)
            .context("Failed to parse TOML config")?;

        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let toml_string = toml::to_string_pretty(self)
            .context("Failed to serialize config to TOML")?;

        std::fs::write(path.as_ref(), toml_string)
            .context("Failed to write config file")?;

        Ok(())
    }

    /// Create default configuration file at path
    pub fn create_default(path: impl AsRef<Path>) -> Result<Self> {
        let config = Self::default();
        config.save(path)?;
        Ok(config)
    }

    /// Explicit path must exist; otherwise the user config file is used if
    /// present, else built-in defaults
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            debug!(?path, "Loading config from explicit path");
            return Self::load(path)
                .with_context(|| format!("Cannot use config {}", path.display()));
        }

        match default_config_path() {
            Some(path) if path.is_file() => {
                debug!(?path, "Loading user config");
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }
}

/// `<config dir>/nbextract/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_NAME).join(CONFIG_FILE_NAME))
}
