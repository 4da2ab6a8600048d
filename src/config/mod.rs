//! Configuration module for rowsample.
//!
//! Handles sampling settings, TOML loading and the process-wide store.

mod global;
mod settings;

pub use global::{configuration, configure, reset_configuration, set_configuration};
pub use settings::{
    SamplingConfig, SettingsError, CONFIG_ENV_VAR, DEFAULT_PRECISION,
    DEFAULT_TABLESAMPLE_THRESHOLD,
};
