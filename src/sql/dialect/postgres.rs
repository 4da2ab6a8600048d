//! PostgreSQL SQL dialect.
//!
//! PostgreSQL features relevant to sampling:
//! - ANSI identifier quoting (`"`)
//! - Native boolean type (true/false)
//! - `TABLESAMPLE BERNOULLI (p)` (9.5+)
//! - `pg_class.reltuples` planner estimate
//! - `RANDOM()` for random ordering

use super::helpers;
use super::SqlDialect;

/// PostgreSQL SQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct Postgres;

impl SqlDialect for Postgres {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_double(ident)
    }

    fn format_bool(&self, b: bool) -> &'static str {
        helpers::format_bool_literal(b)
    }

    // Uses default emit_limit_offset (LIMIT ... OFFSET ...)

    fn supports_tablesample(&self) -> bool {
        true
    }

    fn has_row_estimates(&self) -> bool {
        true
    }
}
