// tests/config/config_test.rs
//
// These tests share the process-wide configuration, so each one holds
// `GLOBAL` for its whole body and resets the store before releasing it.

#[path = "../common/mod.rs"]
mod common;

use std::env;
use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard};

use common::{people_db, Person};
use rowsample::config::{set_configuration, CONFIG_ENV_VAR};
use rowsample::prelude::*;
use rowsample::SettingsError;

static GLOBAL: Mutex<()> = Mutex::new(());

fn lock() -> MutexGuard<'static, ()> {
    let guard = GLOBAL.lock().unwrap_or_else(|e| e.into_inner());
    reset_configuration();
    guard
}

#[test]
fn test_global_starts_at_defaults() {
    let _guard = lock();
    assert_eq!(configuration(), SamplingConfig::default());
}

#[test]
fn test_configure_updates_and_reset_restores() {
    let _guard = lock();

    configure(|c| {
        c.default_strategy = Strategy::OrderBy;
        c.tablesample_threshold = 50_000;
        c.cache_table_sizes = false;
        c.precision = 0.5;
    })
    .unwrap();

    let current = configuration();
    assert_eq!(current.default_strategy, Strategy::OrderBy);
    assert_eq!(current.tablesample_threshold, 50_000);
    assert!(!current.cache_table_sizes);
    assert_eq!(current.precision, 0.5);

    reset_configuration();
    assert_eq!(configuration(), SamplingConfig::default());
}

#[test]
fn test_invalid_update_is_rejected_and_previous_kept() {
    let _guard = lock();

    configure(|c| c.precision = 2.0).unwrap();
    let err = configure(|c| {
        c.precision = 0.0;
        c.tablesample_threshold = 1;
    })
    .unwrap_err();

    assert!(matches!(err, SettingsError::InvalidConfig(_)));
    assert_eq!(configuration().precision, 2.0);
    assert_eq!(configuration().tablesample_threshold, 10_000);
    reset_configuration();
}

#[test]
fn test_set_configuration_replaces_everything() {
    let _guard = lock();

    let config = SamplingConfig::default()
        .with_default_strategy("offset")
        .with_precision(3.0);
    set_configuration(config.clone()).unwrap();
    assert_eq!(configuration(), config);
    reset_configuration();
}

#[tokio::test]
async fn test_sampler_takes_a_snapshot() {
    let _guard = lock();

    configure(|c| c.default_strategy = Strategy::OrderBy).unwrap();
    let session = people_db(10).await;
    let sampler = Sampler::for_record::<Person>(session);

    // Later changes do not reach an existing sampler.
    reset_configuration();
    assert_eq!(sampler.config().default_strategy, Strategy::OrderBy);

    let relation = sampler
        .random::<Person>(3)
        .await
        .unwrap()
        .into_relation()
        .unwrap();
    assert!(relation.to_sql().contains("ORDER BY RANDOM()"));
}

#[tokio::test]
async fn test_explicit_config_ignores_global() {
    let _guard = lock();

    configure(|c| c.default_strategy = Strategy::OrderBy).unwrap();
    let session = people_db(10).await;
    let sampler = Sampler::with_config(session, "people", SamplingConfig::default());

    let relation: Relation<Person> = sampler.plan(&RandomRequest::new(3)).await.unwrap();
    assert!(relation.to_sql().contains("OFFSET"));
    reset_configuration();
}

#[test]
fn test_global_threshold_drives_postgres_choice() {
    let _guard = lock();

    configure(|c| c.tablesample_threshold = 100).unwrap();
    let session = Arc::new(common::pg_session(150));
    let sampler = Sampler::new(session, "people");

    let runtime = tokio::runtime::Runtime::new().unwrap();
    let resolved = runtime
        .block_on(sampler.resolve_strategy(&Strategy::Auto))
        .unwrap();
    assert_eq!(resolved, Strategy::Tablesample);
    reset_configuration();
}

// =============================================================================
// File loading
// =============================================================================

#[test]
fn test_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "[sampling]\ndefault_strategy = \"tablesample\"\ntablesample_threshold = 2000\nprecision = 0.25"
    )
    .unwrap();

    let config = SamplingConfig::from_file(file.path()).unwrap();
    assert_eq!(config.default_strategy, Strategy::Tablesample);
    assert_eq!(config.tablesample_threshold, 2_000);
    assert_eq!(config.precision, 0.25);
    assert!(config.cache_table_sizes);
}

#[test]
fn test_from_file_rejects_invalid_values() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "tablesample_threshold = 0").unwrap();

    let result = SamplingConfig::from_file(file.path());
    assert!(matches!(result, Err(SettingsError::InvalidConfig(_))));
}

#[test]
fn test_load_from_env_var() {
    let _guard = lock();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rowsample.toml");
    std::fs::write(&path, "cache_table_sizes = false\n").unwrap();

    env::set_var(CONFIG_ENV_VAR, &path);
    let loaded = SamplingConfig::load();
    env::remove_var(CONFIG_ENV_VAR);

    let config = loaded.unwrap();
    assert!(!config.cache_table_sizes);
    assert_eq!(config.tablesample_threshold, 10_000);
}

#[test]
fn test_load_from_missing_env_path_is_an_error() {
    let _guard = lock();

    let dir = tempfile::tempdir().unwrap();
    env::set_var(CONFIG_ENV_VAR, dir.path().join("absent.toml"));
    let loaded = SamplingConfig::load();
    env::remove_var(CONFIG_ENV_VAR);

    assert!(matches!(loaded, Err(SettingsError::FileNotFound(_))));
}
