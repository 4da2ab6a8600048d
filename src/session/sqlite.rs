//! SQLite session backed by the bundled `rusqlite` driver.

use std::path::Path;

use async_trait::async_trait;
use rusqlite::types::ValueRef;
use rusqlite::Connection;
use serde_json::Value;
use tokio::sync::Mutex;

use super::{Row, Session, SessionResult};

/// Session over a single SQLite connection.
///
/// The connection is guarded by an async mutex, so statements from
/// concurrent tasks run one at a time.
#[derive(Debug)]
pub struct SqliteSession {
    conn: Mutex<Connection>,
}

impl SqliteSession {
    /// Open a private in-memory database.
    pub fn open_in_memory() -> SessionResult<Self> {
        Ok(Self::from_connection(Connection::open_in_memory()?))
    }

    /// Open (or create) a database file.
    pub fn open(path: impl AsRef<Path>) -> SessionResult<Self> {
        Ok(Self::from_connection(Connection::open(path)?))
    }

    /// Wrap an existing connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Run one or more statements that return no rows (DDL, inserts).
    pub async fn execute_batch(&self, sql: &str) -> SessionResult<()> {
        let conn = self.conn.lock().await;
        conn.execute_batch(sql)?;
        Ok(())
    }
}

#[async_trait]
impl Session for SqliteSession {
    fn adapter_name(&self) -> &str {
        "sqlite"
    }

    async fn select_rows(&self, sql: &str) -> SessionResult<Vec<Row>> {
        let conn = self.conn.lock().await;
        query_rows(&conn, sql)
    }
}

fn query_rows(conn: &Connection, sql: &str) -> SessionResult<Vec<Row>> {
    let mut stmt = conn.prepare(sql)?;
    let columns: Vec<String> = stmt
        .column_names()
        .into_iter()
        .map(String::from)
        .collect();

    let mut rows = stmt.query([])?;
    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        let mut values = Vec::with_capacity(columns.len());
        for i in 0..columns.len() {
            values.push(to_json(row.get_ref(i)?));
        }
        out.push(Row::new(columns.clone(), values));
    }
    Ok(out)
}

fn to_json(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::from(i),
        ValueRef::Real(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        ValueRef::Text(bytes) => Value::String(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(bytes) => Value::Array(bytes.iter().map(|b| Value::from(*b)).collect()),
    }
}
