//! Logging setup for rowsample.
//!
//! The library only emits `tracing` events; installing a subscriber is left
//! to the application. [`init_logging`] is a convenience for binaries and
//! tests that just want readable output on stderr.
//!
//! Events emitted by this crate:
//!
//! - `debug`: resolved strategy, estimate source (catalog or exact count),
//!   generated plan SQL, catalog lookups that fell back to `COUNT(*)`
//! - `trace`: table-size cache hits
//! - `warn`: unrecognised strategy names absorbed by the offset plan

use tracing::Level;

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log level for the application
    pub level: Level,
    /// Log level for rowsample components specifically
    pub crate_level: Level,
    /// Whether to include the event target in output
    pub with_target: bool,
    /// Environment filter override
    pub env_filter: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            crate_level: Level::INFO,
            with_target: true,
            env_filter: None,
        }
    }
}

impl LogConfig {
    /// Shows every strategy decision and generated statement.
    pub fn development() -> Self {
        Self {
            level: Level::DEBUG,
            crate_level: Level::TRACE,
            with_target: true,
            env_filter: None,
        }
    }

    /// Only warnings and errors.
    pub fn production() -> Self {
        Self {
            level: Level::WARN,
            crate_level: Level::WARN,
            with_target: false,
            env_filter: None,
        }
    }

    /// Sets the log level for the application.
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Sets the log level for rowsample components.
    pub fn with_crate_level(mut self, level: Level) -> Self {
        self.crate_level = level;
        self
    }

    /// Sets a custom environment filter.
    pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Builds the environment filter string.
    pub fn env_filter(&self) -> String {
        if let Some(ref filter) = self.env_filter {
            filter.clone()
        } else {
            format!(
                "{},rowsample={}",
                self.level.as_str().to_lowercase(),
                self.crate_level.as_str().to_lowercase()
            )
        }
    }
}

/// Installs a global fmt subscriber.
///
/// `RUST_LOG` takes precedence over the configured filter. Calling this more
/// than once returns an error from the second call on; the first subscriber
/// stays installed.
///
/// # Examples
///
/// ```rust,no_run
/// use rowsample::logging::{init_logging, LogConfig};
///
/// init_logging(LogConfig::development()).unwrap();
/// ```
pub fn init_logging(config: LogConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.env_filter()));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(config.with_target)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
