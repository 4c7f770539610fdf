//! # Run Configuration
//!
//! Three layers, highest precedence first: command-line flags, an optional
//! YAML file passed with `--config`, and built-in defaults.
//!
//! ```yaml
//! randomizations: 10000
//! seed: 7
//! workers: 4
//! format: json
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use mantel_core::DEFAULT_RANDOMIZATIONS;

/// Report rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `r m sd z` on one line.
    #[default]
    Text,
    /// JSON object with the result and run parameters.
    Json,
}

/// Values read from a `--config` YAML file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub randomizations: Option<usize>,
    pub seed: Option<u64>,
    pub workers: Option<usize>,
    pub format: Option<OutputFormat>,
}

impl FileConfig {
    /// Load a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        // An empty document deserializes to unit, not a map.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }
}

/// Command-line overrides; `None` means "not given".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub randomizations: Option<usize>,
    pub seed: Option<u64>,
    pub workers: Option<usize>,
    pub format: Option<OutputFormat>,
}

/// Fully resolved settings for one run.
///
/// Range checks on `randomizations` and `workers` happen when the
/// `MantelTest` is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunConfig {
    pub randomizations: usize,
    pub seed: Option<u64>,
    pub workers: usize,
    pub format: OutputFormat,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            randomizations: DEFAULT_RANDOMIZATIONS,
            seed: None,
            workers: 1,
            format: OutputFormat::Text,
        }
    }
}

impl RunConfig {
    /// Layer `overrides` over `file` over defaults.
    pub fn resolve(overrides: &Overrides, file: &FileConfig) -> Self {
        let defaults = Self::default();
        Self {
            randomizations: overrides
                .randomizations
                .or(file.randomizations)
                .unwrap_or(defaults.randomizations),
            seed: overrides.seed.or(file.seed),
            workers: overrides.workers.or(file.workers).unwrap_or(defaults.workers),
            format: overrides.format.or(file.format).unwrap_or(defaults.format),
        }
    }
}
