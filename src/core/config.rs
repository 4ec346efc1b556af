//! Configuration - user and project level defaults
//!
//! Resolution order (later wins):
//! 1. Built-in defaults
//! 2. User config: `<config dir>/cogs/config.yaml`
//! 3. Project config: `.cogs.yaml` in the working directory
//! 4. Command-line flags and environment (`COGS_LANG`, `COGS_CURRENCY`)

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::sensitivity::DEFAULT_DELTA;
use crate::entities::localized::DEFAULT_LANG;

/// Project-level config file name
pub const PROJECT_CONFIG_FILE: &str = ".cogs.yaml";

/// Errors reading a config file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// A single config layer; unset fields leave the lower layer untouched
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ConfigLayer {
    /// Language used to resolve step and component names
    pub lang: Option<String>,

    /// Currency label shown instead of the dataset's own
    pub currency: Option<String>,

    /// Relative perturbation for sensitivity analysis
    pub sensitivity_delta: Option<f64>,

    /// Rows shown by `cogs sens`
    pub top_n: Option<usize>,

    /// Maximum scenarios evaluated in one `cogs scenario` run
    pub max_scenarios: Option<usize>,
}

/// Effective configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Config {
    pub lang: String,
    pub currency: Option<String>,
    pub sensitivity_delta: f64,
    pub top_n: usize,
    pub max_scenarios: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lang: DEFAULT_LANG.to_string(),
            currency: None,
            sensitivity_delta: DEFAULT_DELTA,
            top_n: 15,
            max_scenarios: 3,
        }
    }
}

impl Config {
    /// Load defaults, then the user config, then the project config in `cwd`
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(path) = Self::user_config_path() {
            if let Some(layer) = Self::read_layer(&path)? {
                tracing::debug!(path = %path.display(), "loaded user config");
                config.merge(layer);
            }
        }

        let project = cwd.join(PROJECT_CONFIG_FILE);
        if let Some(layer) = Self::read_layer(&project)? {
            tracing::debug!(path = %project.display(), "loaded project config");
            config.merge(layer);
        }

        Ok(config)
    }

    /// Location of the user config file, if the platform has a config dir
    pub fn user_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "cogs").map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Read a layer; a missing file is not an error
    fn read_layer(path: &Path) -> Result<Option<ConfigLayer>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_layer(&content, path).map(Some)
    }

    fn parse_layer(content: &str, path: &Path) -> Result<ConfigLayer, ConfigError> {
        if content.trim().is_empty() {
            return Ok(ConfigLayer::default());
        }
        serde_yml::from_str(content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Overlay the set fields of `layer`
    pub fn merge(&mut self, layer: ConfigLayer) {
        if let Some(lang) = layer.lang {
            self.lang = lang;
        }
        if layer.currency.is_some() {
            self.currency = layer.currency;
        }
        if let Some(delta) = layer.sensitivity_delta {
            self.sensitivity_delta = delta;
        }
        if let Some(top_n) = layer.top_n {
            self.top_n = top_n;
        }
        if let Some(max) = layer.max_scenarios {
            self.max_scenarios = max;
        }
    }

    /// Currency to display: the config override, else the dataset's own
    pub fn currency_or<'a>(&'a self, dataset_currency: &'a str) -> &'a str {
        self.currency.as_deref().unwrap_or(dataset_currency)
    }
}
