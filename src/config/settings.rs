//! TOML-based sampling configuration.
//!
//! Keys may sit at the top level of the file or under a `[sampling]` table.
//!
//! Example configuration:
//! ```toml
//! [sampling]
//! default_strategy = "auto"       # auto | tablesample | offset | order_by
//! tablesample_threshold = 10000   # PostgreSQL: tablesample above this many rows
//! cache_table_sizes = true        # remember table-size estimates per sampler
//! precision = 1.0                 # TABLESAMPLE BERNOULLI percentage, (0, 100]
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::sampling::Strategy;

/// Environment variable naming a config file.
pub const CONFIG_ENV_VAR: &str = "ROWSAMPLE_CONFIG";

/// Default `tablesample_threshold`.
pub const DEFAULT_TABLESAMPLE_THRESHOLD: u64 = 10_000;

/// Default `precision`, also the "not specified" value of a request.
pub const DEFAULT_PRECISION: f64 = 1.0;

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Sampling settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Strategy used when a call asks for `auto`.
    pub default_strategy: Strategy,

    /// PostgreSQL tables with more estimated rows than this use tablesample.
    pub tablesample_threshold: u64,

    /// Remember table-size estimates instead of recomputing them per call.
    pub cache_table_sizes: bool,

    /// Bernoulli sampling percentage used when a call does not set one.
    pub precision: f64,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            default_strategy: Strategy::Auto,
            tablesample_threshold: DEFAULT_TABLESAMPLE_THRESHOLD,
            cache_table_sizes: true,
            precision: DEFAULT_PRECISION,
        }
    }
}

impl SamplingConfig {
    pub fn with_default_strategy(mut self, strategy: impl Into<Strategy>) -> Self {
        self.default_strategy = strategy.into();
        self
    }

    pub fn with_tablesample_threshold(mut self, threshold: u64) -> Self {
        self.tablesample_threshold = threshold;
        self
    }

    pub fn with_cache_table_sizes(mut self, enabled: bool) -> Self {
        self.cache_table_sizes = enabled;
        self
    }

    pub fn with_precision(mut self, precision: f64) -> Self {
        self.precision = precision;
        self
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.tablesample_threshold == 0 {
            return Err(SettingsError::InvalidConfig(
                "tablesample_threshold must be greater than 0".into(),
            ));
        }
        if !self.precision.is_finite() || self.precision <= 0.0 || self.precision > 100.0 {
            return Err(SettingsError::InvalidConfig(format!(
                "precision must be in (0, 100], got {}",
                self.precision
            )));
        }
        Ok(())
    }

    /// Parse and validate TOML content.
    pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
        let mut root: toml::Table = toml::from_str(content)?;
        let section = match root.remove("sampling") {
            Some(toml::Value::Table(section)) => section,
            Some(_) => {
                return Err(SettingsError::InvalidConfig(
                    "`sampling` must be a table".into(),
                ))
            }
            None => root,
        };

        let config: SamplingConfig = toml::Value::Table(section).try_into()?;
        config.validate()?;
        Ok(config)
    }

    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `ROWSAMPLE_CONFIG`
    /// 2. `./rowsample.toml`
    /// 3. `~/.config/rowsample/config.toml`
    ///
    /// Falls back to defaults when none exists.
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var(CONFIG_ENV_VAR) {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from("rowsample.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("rowsample").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        Ok(SamplingConfig::default())
    }
}
