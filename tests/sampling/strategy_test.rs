// tests/sampling/strategy_test.rs
#[path = "../common/mod.rs"]
mod common;

use std::sync::Arc;

use common::{people_db, pg_session};
use proptest::prelude::*;
use rowsample::prelude::{Dialect, Sampler, SamplingConfig, ScriptedSession};
use rowsample::sampling::{Resolution, StrategyResolver};

fn any_dialect() -> impl Strategy<Value = Dialect> {
    prop_oneof![
        Just(Dialect::Postgres),
        Just(Dialect::MySql),
        Just(Dialect::Sqlite),
        Just(Dialect::Ansi),
    ]
}

proptest! {
    #[test]
    fn prop_non_auto_requests_pass_through(name in "[a-zA-Z_-]{1,16}", dialect in any_dialect()) {
        let requested = rowsample::Strategy::parse(&name);
        prop_assume!(!requested.is_auto());

        let config = SamplingConfig::default();
        let resolver = StrategyResolver::new(&config);
        prop_assert_eq!(
            resolver.resolve_static(&requested, dialect),
            Resolution::Resolved(requested.clone())
        );
    }

    #[test]
    fn prop_tablesample_only_above_threshold(threshold in 1u64..1_000_000, estimate in 0u64..2_000_000) {
        let config = SamplingConfig::default().with_tablesample_threshold(threshold);
        let resolver = StrategyResolver::new(&config);
        let expected = if estimate > threshold {
            rowsample::Strategy::Tablesample
        } else {
            rowsample::Strategy::Offset
        };
        prop_assert_eq!(resolver.choose_by_size(estimate), expected);
    }

    #[test]
    fn prop_parse_never_fails_and_display_reparses(name in "\\PC{0,24}") {
        let strategy = rowsample::Strategy::parse(&name);
        prop_assert_eq!(rowsample::Strategy::parse(&strategy.to_string()), strategy);
    }
}

async fn resolve_postgres(reltuples: i64) -> rowsample::Strategy {
    let session = Arc::new(pg_session(reltuples));
    let sampler = Sampler::with_config(session, "people", SamplingConfig::default());
    sampler.resolve_strategy(&rowsample::Strategy::Auto).await.unwrap()
}

#[tokio::test]
async fn test_postgres_threshold_boundary() {
    assert_eq!(resolve_postgres(9_999).await, rowsample::Strategy::Offset);
    assert_eq!(resolve_postgres(10_000).await, rowsample::Strategy::Offset);
    assert_eq!(resolve_postgres(10_001).await, rowsample::Strategy::Tablesample);
}

#[tokio::test]
async fn test_postgres_custom_threshold() {
    let session = Arc::new(pg_session(600));
    let sampler = Sampler::with_config(
        session,
        "people",
        SamplingConfig::default().with_tablesample_threshold(500),
    );
    assert_eq!(
        sampler.resolve_strategy(&rowsample::Strategy::Auto).await.unwrap(),
        rowsample::Strategy::Tablesample
    );
}

#[tokio::test]
async fn test_mysql_and_sqlite_resolve_without_queries() {
    let mysql = Arc::new(ScriptedSession::new("mysql2"));
    let sampler = Sampler::with_config(mysql.clone(), "people", SamplingConfig::default());
    assert_eq!(
        sampler.resolve_strategy(&rowsample::Strategy::Auto).await.unwrap(),
        rowsample::Strategy::Offset
    );
    assert!(mysql.executed().is_empty());

    let sqlite = people_db(3).await;
    let sampler = Sampler::with_config(sqlite, "people", SamplingConfig::default());
    assert_eq!(
        sampler.resolve_strategy(&rowsample::Strategy::Auto).await.unwrap(),
        rowsample::Strategy::Offset
    );
}

#[tokio::test]
async fn test_unknown_engine_resolves_to_order_by() {
    let session = Arc::new(ScriptedSession::new("Oracle"));
    let sampler = Sampler::with_config(session, "people", SamplingConfig::default());
    assert_eq!(
        sampler.resolve_strategy(&rowsample::Strategy::Auto).await.unwrap(),
        rowsample::Strategy::OrderBy
    );
}

#[tokio::test]
async fn test_explicit_strategy_skips_estimate() {
    let session = Arc::new(pg_session(50_000));
    let sampler = Sampler::with_config(session.clone(), "people", SamplingConfig::default());

    let resolved = sampler
        .resolve_strategy(&rowsample::Strategy::OrderBy)
        .await
        .unwrap();
    assert_eq!(resolved, rowsample::Strategy::OrderBy);
    assert!(session.executed().is_empty());
}

#[tokio::test]
async fn test_unknown_strategy_is_returned_verbatim() {
    let session = Arc::new(pg_session(50_000));
    let sampler = Sampler::with_config(session, "people", SamplingConfig::default());

    let requested = rowsample::Strategy::parse("Reservoir");
    assert_eq!(
        sampler.resolve_strategy(&requested).await.unwrap(),
        rowsample::Strategy::Unknown("Reservoir".into())
    );
}
