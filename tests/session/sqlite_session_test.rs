// tests/session/sqlite_session_test.rs
#[path = "../common/mod.rs"]
mod common;

use std::sync::Arc;

use common::Person;
use rowsample::prelude::*;
use serde_json::json;

#[tokio::test]
async fn test_file_database_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("people.db");

    {
        let session = SqliteSession::open(&path).unwrap();
        session
            .execute_batch(
                "CREATE TABLE people (id INTEGER PRIMARY KEY, name TEXT NOT NULL);
                 INSERT INTO people (id, name) VALUES (1, 'Ada'), (2, 'Grace');",
            )
            .await
            .unwrap();
    }

    let session = SqliteSession::open(&path).unwrap();
    assert_eq!(session.count("people").await.unwrap(), 2);
}

#[tokio::test]
async fn test_rows_decode_into_records() {
    let session = SqliteSession::open_in_memory().unwrap();
    session
        .execute_batch(
            "CREATE TABLE people (id INTEGER PRIMARY KEY, name TEXT NOT NULL);
             INSERT INTO people (id, name) VALUES (1, 'Ada');",
        )
        .await
        .unwrap();

    let rows = session
        .select_rows("SELECT id, name FROM people")
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get(1), Some(&json!("Ada")));

    let person = Person::from_row(&rows[0]).unwrap();
    assert_eq!(person.id, 1);
    assert_eq!(person.name, "Ada");
}

#[tokio::test]
async fn test_decode_failure_surfaces() {
    let session = SqliteSession::open_in_memory().unwrap();
    session
        .execute_batch("CREATE TABLE people (id INTEGER); INSERT INTO people VALUES (1);")
        .await
        .unwrap();

    let rows = session.select_rows("SELECT id FROM people").await.unwrap();
    let err = Person::from_row(&rows[0]).unwrap_err();
    assert!(matches!(err, SessionError::Decode(_)));
}

#[tokio::test]
async fn test_count_on_missing_table_is_query_error() {
    let session = SqliteSession::open_in_memory().unwrap();
    let err = session.count("people").await.unwrap_err();
    assert!(err.is_query_error());
}

#[tokio::test]
async fn test_adapter_name_and_dialect() {
    let session = SqliteSession::open_in_memory().unwrap();
    assert_eq!(session.adapter_name(), "sqlite");
    assert_eq!(session.dialect(), Dialect::Sqlite);
}

#[tokio::test]
async fn test_concurrent_samplers_share_one_connection() {
    let session = Arc::new(SqliteSession::open_in_memory().unwrap());
    let mut sql = String::from("CREATE TABLE people (id INTEGER PRIMARY KEY, name TEXT NOT NULL);");
    for id in 1..=50 {
        sql.push_str(&format!("INSERT INTO people VALUES ({id}, 'p{id}');"));
    }
    session.execute_batch(&sql).await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let session = session.clone();
        handles.push(tokio::spawn(async move {
            let sampler = Sampler::with_config(session, "people", SamplingConfig::default());
            sampler.random::<Person>(1).await.map(Sample::into_record)
        }));
    }

    for handle in handles {
        let person = handle.await.unwrap().unwrap().unwrap();
        assert!((1..=50).contains(&person.id));
    }
}
