//! Process-wide sampling configuration.
//!
//! One [`SamplingConfig`] lives for the whole process, starting at the
//! defaults. Samplers created with `Sampler::new` take a snapshot of it;
//! `Sampler::with_config` bypasses it entirely.

use std::sync::{PoisonError, RwLock};

use once_cell::sync::Lazy;

use super::settings::{SamplingConfig, SettingsError};

static CONFIGURATION: Lazy<RwLock<SamplingConfig>> =
    Lazy::new(|| RwLock::new(SamplingConfig::default()));

/// Snapshot of the current process-wide configuration.
pub fn configuration() -> SamplingConfig {
    CONFIGURATION
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Apply an update to the process-wide configuration.
///
/// The update runs on a copy; the copy replaces the live value only if it
/// validates, so a rejected update leaves the previous settings in place.
///
/// # Example
///
/// ```ignore
/// rowsample::configure(|c| {
///     c.tablesample_threshold = 50_000;
///     c.precision = 0.5;
/// })?;
/// ```
pub fn configure<F>(update: F) -> Result<(), SettingsError>
where
    F: FnOnce(&mut SamplingConfig),
{
    let mut live = CONFIGURATION
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    let mut next = live.clone();
    update(&mut next);
    next.validate()?;
    *live = next;
    Ok(())
}

/// Replace the process-wide configuration wholesale.
pub fn set_configuration(config: SamplingConfig) -> Result<(), SettingsError> {
    configure(|c| *c = config)
}

/// Discard every override and return to the defaults.
pub fn reset_configuration() {
    *CONFIGURATION
        .write()
        .unwrap_or_else(PoisonError::into_inner) = SamplingConfig::default();
}
