//! In-memory session that answers from a script.
//!
//! Useful for exercising engine-specific behaviour (PostgreSQL statistics
//! catalog, MySQL `information_schema`) without a live server.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use super::{count_sql, Row, Session, SessionError, SessionResult};

#[derive(Debug, Clone)]
enum Response {
    Rows(Vec<Row>),
    Fail(String),
}

/// A session double configured with canned responses.
///
/// Statements are matched against scripted fragments in registration order;
/// the first fragment contained in the SQL wins. `count` consults the
/// script first (so count failures can be scripted) and then the exact
/// counts registered with [`ScriptedSession::with_count`]. Every statement
/// is recorded and can be inspected with [`ScriptedSession::executed`].
///
/// # Example
///
/// ```ignore
/// let session = ScriptedSession::new("postgresql")
///     .with_rows("pg_class", vec![Row::from_pairs([("reltuples", 50_000)])])
///     .with_count("people", 49_876);
/// ```
#[derive(Debug)]
pub struct ScriptedSession {
    adapter_name: String,
    counts: HashMap<String, u64>,
    script: Vec<(String, Response)>,
    executed: Mutex<Vec<String>>,
}

impl ScriptedSession {
    /// Create a session reporting the given adapter name.
    pub fn new(adapter_name: impl Into<String>) -> Self {
        Self {
            adapter_name: adapter_name.into(),
            counts: HashMap::new(),
            script: Vec::new(),
            executed: Mutex::new(Vec::new()),
        }
    }

    /// Exact row count returned by `count(table)`.
    pub fn with_count(mut self, table: &str, rows: u64) -> Self {
        self.counts.insert(table.into(), rows);
        self
    }

    /// Rows returned for statements containing `fragment`.
    pub fn with_rows(mut self, fragment: &str, rows: Vec<Row>) -> Self {
        self.script.push((fragment.into(), Response::Rows(rows)));
        self
    }

    /// Fail statements containing `fragment` with a query error.
    pub fn with_failure(mut self, fragment: &str, message: &str) -> Self {
        self.script
            .push((fragment.into(), Response::Fail(message.into())));
        self
    }

    /// All statements executed so far, in order.
    pub fn executed(&self) -> Vec<String> {
        self.log().clone()
    }

    /// Number of executed statements containing `fragment`.
    pub fn executed_matching(&self, fragment: &str) -> usize {
        self.log().iter().filter(|sql| sql.contains(fragment)).count()
    }

    /// Forget the executed-statement log.
    pub fn clear_executed(&self) {
        self.log().clear();
    }

    fn log(&self) -> std::sync::MutexGuard<'_, Vec<String>> {
        self.executed.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn scripted(&self, sql: &str) -> Option<SessionResult<Vec<Row>>> {
        self.script
            .iter()
            .find(|(fragment, _)| sql.contains(fragment.as_str()))
            .map(|(_, response)| match response {
                Response::Rows(rows) => Ok(rows.clone()),
                Response::Fail(message) => Err(SessionError::query(sql, message.clone())),
            })
    }
}

#[async_trait]
impl Session for ScriptedSession {
    fn adapter_name(&self) -> &str {
        &self.adapter_name
    }

    async fn select_rows(&self, sql: &str) -> SessionResult<Vec<Row>> {
        self.log().push(sql.to_string());
        self.scripted(sql).unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn count(&self, table: &str) -> SessionResult<u64> {
        let sql = count_sql(self.dialect(), table);
        self.log().push(sql.clone());

        if let Some(result) = self.scripted(&sql) {
            return result.map(|rows| {
                rows.first()
                    .and_then(Row::first)
                    .map(super::coerce_count)
                    .unwrap_or(0)
            });
        }

        self.counts
            .get(table)
            .copied()
            .ok_or_else(|| SessionError::query(sql, format!("no such table: {table}")))
    }
}
