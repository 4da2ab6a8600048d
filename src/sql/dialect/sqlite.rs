//! SQLite SQL dialect.
//!
//! SQLite is the local/dev engine:
//! - ANSI identifier quoting (`"`)
//! - No boolean type (1/0)
//! - LIMIT ... OFFSET ...
//! - `RANDOM()` for random ordering
//! - No statistics catalog, row counts are always exact

use super::helpers;
use super::SqlDialect;

/// SQLite SQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct Sqlite;

impl SqlDialect for Sqlite {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_double(ident)
    }

    fn format_bool(&self, b: bool) -> &'static str {
        helpers::format_bool_numeric(b)
    }
}
