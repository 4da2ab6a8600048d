//! Session error types.

use thiserror::Error;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors raised by a database session.
#[derive(Error, Debug)]
pub enum SessionError {
    /// The database rejected or failed a statement.
    #[error("query failed: {message}\nSQL: {sql}")]
    Query {
        /// Statement that failed.
        sql: String,
        /// Driver-reported message.
        message: String,
    },

    /// Error from the bundled SQLite driver.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A row could not be converted into the requested shape.
    #[error("failed to decode row: {0}")]
    Decode(String),
}

impl SessionError {
    /// Create a query error for a failed statement.
    pub fn query(sql: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Query {
            sql: sql.into(),
            message: message.into(),
        }
    }

    /// Create a decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    /// Check if this error came from executing a statement.
    pub fn is_query_error(&self) -> bool {
        matches!(self, Self::Query { .. } | Self::Sqlite(_))
    }
}
