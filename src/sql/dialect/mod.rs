//! SQL Dialect definitions and formatting rules.
//!
//! This module provides a trait-based abstraction for the engine differences
//! that matter to random row selection:
//!
//! - Identifier quoting: `"` (ANSI/PG/SQLite), `` ` `` (MySQL)
//! - Random ordering function: `RANDOM()` vs `RAND()`
//! - Native `TABLESAMPLE` support (PostgreSQL only)
//! - Pagination: `LIMIT n OFFSET m`
//!
//! # Engine families
//!
//! Database drivers report an adapter name (`"postgresql"`, `"mysql2"`,
//! `"sqlite"`, ...). [`Dialect::from_adapter_name`] maps that name onto a
//! closed set of dialects exactly once; everything downstream matches on the
//! enum instead of comparing strings.
//!
//! | Feature | PostgreSQL | MySQL | SQLite | ANSI (unknown) |
//! |---------|-----------|-------|--------|----------------|
//! | TABLESAMPLE BERNOULLI | 9.5+ | ❌ | ❌ | ❌ |
//! | Random function | `RANDOM()` | `RAND()` | `RANDOM()` | `RANDOM()` |
//! | Statistics catalog | `pg_class` | `information_schema` | ❌ | ❌ |
//!
//! # Usage
//!
//! ```ignore
//! use rowsample::dialect::{Dialect, SqlDialect};
//!
//! let dialect = Dialect::from_adapter_name("PostgreSQL");
//! assert_eq!(dialect, Dialect::Postgres);
//! assert_eq!(dialect.random_function(), "RANDOM");
//! ```

mod ansi;
pub mod helpers;
mod mysql;
mod postgres;
mod sqlite;

pub use ansi::Ansi;
pub use mysql::MySql;
pub use postgres::Postgres;
pub use sqlite::Sqlite;

use super::token::TokenStream;

/// SQL dialect trait - defines how SQL constructs are rendered.
///
/// Implementations handle dialect-specific syntax differences.
/// The default implementations follow ANSI SQL where possible.
pub trait SqlDialect: std::fmt::Debug {
    /// Dialect name for display/logging.
    fn name(&self) -> &'static str;

    // =========================================================================
    // Identifier and Literal Quoting
    // =========================================================================

    /// Quote an identifier (table, column, alias).
    ///
    /// - ANSI/PostgreSQL/SQLite: `"identifier"`
    /// - MySQL: `` `identifier` ``
    fn quote_identifier(&self, ident: &str) -> String;

    /// Quote a string literal.
    ///
    /// All dialects use single quotes with `''` for escaping.
    fn quote_string(&self, s: &str) -> String {
        helpers::quote_string_single(s)
    }

    /// Format a boolean literal.
    ///
    /// - PostgreSQL: `true`/`false`
    /// - MySQL/SQLite: `1`/`0`
    fn format_bool(&self, b: bool) -> &'static str;

    /// Format a NULL literal.
    fn format_null(&self) -> &'static str {
        "NULL"
    }

    // =========================================================================
    // Pagination
    // =========================================================================

    /// Emit LIMIT/OFFSET clause.
    fn emit_limit_offset(&self, limit: Option<u64>, offset: Option<u64>) -> TokenStream {
        helpers::emit_limit_offset_standard(limit, offset)
    }

    // =========================================================================
    // Sampling
    // =========================================================================

    /// Name of the function producing a random value per row, used for
    /// `ORDER BY <fn>()`.
    ///
    /// - PostgreSQL/SQLite/ANSI: `RANDOM`
    /// - MySQL: `RAND`
    fn random_function(&self) -> &'static str {
        "RANDOM"
    }

    /// Whether this dialect supports `TABLESAMPLE BERNOULLI(p)` in FROM.
    fn supports_tablesample(&self) -> bool {
        false
    }

    /// Whether this dialect exposes a planner statistics catalog that can
    /// answer "how many rows does this table have" without a scan.
    fn has_row_estimates(&self) -> bool {
        false
    }
}

/// Supported SQL dialects.
///
/// `Sqlite` is the local/dev engine; `Ansi` covers every adapter this crate
/// does not recognise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dialect {
    Postgres,
    MySql,
    Sqlite,
    #[default]
    Ansi,
}

impl Dialect {
    /// Get the dialect implementation.
    pub fn dialect(&self) -> &'static dyn SqlDialect {
        match self {
            Dialect::Postgres => &Postgres,
            Dialect::MySql => &MySql,
            Dialect::Sqlite => &Sqlite,
            Dialect::Ansi => &Ansi,
        }
    }

    /// Map a driver-reported adapter name onto an engine family.
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace.
    /// Unrecognised names map to [`Dialect::Ansi`].
    pub fn from_adapter_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "postgresql" | "postgres" | "pg" | "postgis" => Dialect::Postgres,
            "mysql" | "mysql2" | "trilogy" | "mariadb" => Dialect::MySql,
            "sqlite" | "sqlite3" => Dialect::Sqlite,
            _ => Dialect::Ansi,
        }
    }
}

// Implement SqlDialect for Dialect enum by delegating to concrete types
impl SqlDialect for Dialect {
    fn name(&self) -> &'static str {
        self.dialect().name()
    }

    fn quote_identifier(&self, ident: &str) -> String {
        self.dialect().quote_identifier(ident)
    }

    fn quote_string(&self, s: &str) -> String {
        self.dialect().quote_string(s)
    }

    fn format_bool(&self, b: bool) -> &'static str {
        self.dialect().format_bool(b)
    }

    fn format_null(&self) -> &'static str {
        self.dialect().format_null()
    }

    fn emit_limit_offset(&self, limit: Option<u64>, offset: Option<u64>) -> TokenStream {
        self.dialect().emit_limit_offset(limit, offset)
    }

    fn random_function(&self) -> &'static str {
        self.dialect().random_function()
    }

    fn supports_tablesample(&self) -> bool {
        self.dialect().supports_tablesample()
    }

    fn has_row_estimates(&self) -> bool {
        self.dialect().has_row_estimates()
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.dialect().name())
    }
}
