//! Database sessions.
//!
//! The [`Session`] trait is the only thing the sampling engine needs from a
//! database: the driver's adapter name, the ability to run a SELECT and get
//! rows back, and an exact row count.
//!
//! Two implementations ship with the crate:
//!
//! - [`SqliteSession`] - bundled SQLite, for local development and tests
//! - [`ScriptedSession`] - in-memory double that answers from canned
//!   responses, used to exercise PostgreSQL/MySQL behaviour without a server
//!
//! # Example
//!
//! ```ignore
//! use rowsample::session::{Session, SqliteSession};
//!
//! let session = SqliteSession::open_in_memory()?;
//! session.execute_batch("CREATE TABLE people (id INTEGER, name TEXT)").await?;
//! assert_eq!(session.count("people").await?, 0);
//! ```

mod error;
mod row;
mod scripted;
mod sqlite;

pub use error::{SessionError, SessionResult};
pub use row::{coerce_count, Row};
pub use scripted::ScriptedSession;
pub use sqlite::SqliteSession;

use async_trait::async_trait;

use crate::dialect::Dialect;
use crate::expr::{count_star, ExprExt};
use crate::query::{Query, TableRef};

/// A connection-like handle able to run read queries.
#[async_trait]
pub trait Session: Send + Sync {
    /// Adapter name as reported by the driver (`"postgresql"`, `"mysql2"`, ...).
    fn adapter_name(&self) -> &str;

    /// Engine family, resolved from the adapter name.
    fn dialect(&self) -> Dialect {
        Dialect::from_adapter_name(self.adapter_name())
    }

    /// Run a SELECT and return every row.
    async fn select_rows(&self, sql: &str) -> SessionResult<Vec<Row>>;

    /// Exact number of rows in `table`.
    ///
    /// Default implementation runs `SELECT COUNT(*) AS count FROM table`.
    async fn count(&self, table: &str) -> SessionResult<u64> {
        let sql = count_sql(self.dialect(), table);
        let rows = self.select_rows(&sql).await?;
        rows.first()
            .and_then(Row::first)
            .map(coerce_count)
            .ok_or_else(|| SessionError::decode(format!("COUNT(*) on `{table}` returned no rows")))
    }
}

/// `SELECT COUNT(*) AS count FROM table` for a dialect.
pub fn count_sql(dialect: Dialect, table: &str) -> String {
    Query::new()
        .select(vec![count_star().alias("count")])
        .from(TableRef::new(table))
        .to_sql(dialect)
}
