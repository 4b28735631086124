//! CLI configuration.
//!
//! Read from an optional YAML file passed with `--config`, then overridden
//! by environment variables:
//!
//! - `SURE_MAX_DEPTH` — maximum value nesting depth (default: 64)
//!
//! ```yaml
//! max_depth: 32
//! compact: true
//! ```

use std::path::Path;

use serde::Deserialize;
use sure_schema::{NormalizeOptions, DEFAULT_MAX_DEPTH};

/// Environment variable overriding `max_depth`.
pub const MAX_DEPTH_ENV: &str = "SURE_MAX_DEPTH";

/// Settings shared by all subcommands.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Maximum value nesting depth before normalization gives up.
    pub max_depth: usize,
    /// Print JSON without indentation.
    pub compact: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            compact: false,
        }
    }
}

impl CliConfig {
    /// Load from `path` if given, then apply environment overrides.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or parsed, or an
    /// environment override is not a valid number.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .map_err(|e| ConfigError::Read(path.display().to_string(), e.to_string()))?;
                Self::from_yaml_str(&content)?
            }
            None => Self::default(),
        };
        config.with_max_depth_override(std::env::var(MAX_DEPTH_ENV).ok().as_deref())
    }

    /// Parse YAML configuration text. Empty text yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for invalid YAML or unknown keys.
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Replace `max_depth` with `raw` when present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnv` when `raw` is not an unsigned integer.
    pub fn with_max_depth_override(mut self, raw: Option<&str>) -> Result<Self, ConfigError> {
        if let Some(raw) = raw {
            self.max_depth = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidEnv(MAX_DEPTH_ENV, raw.to_string()))?;
        }
        Ok(self)
    }

    /// Normalizer options derived from this configuration.
    pub fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            max_depth: self.max_depth,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config file '{0}': {1}")]
    Read(String, String),
    #[error("invalid config: {0}")]
    Parse(String),
    #[error("invalid value for {0}: '{1}'")]
    InvalidEnv(&'static str, String),
}
