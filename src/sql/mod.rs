//! SQL generation module.
//!
//! This module provides a type-safe SQL builder that generates multi-dialect SQL.
//! It includes:
//!
//! - [`query`] - SELECT query builder (with `TABLESAMPLE` support)
//! - [`expr`] - Expression AST and builder DSL
//! - [`token`] - Token types for SQL generation
//! - [`dialect`] - SQL dialect implementations

pub mod dialect;
pub mod expr;
pub mod query;
pub mod token;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types at the sql module level
pub use dialect::{Dialect, SqlDialect};
pub use expr::{
    col, count_star, func, lit_bool, lit_float, lit_int, lit_null, lit_str, random, raw_sql, star,
    table_col, BinaryOperator, Expr, ExprExt, Literal, UnaryOperator,
};
pub use query::{LimitOffset, OrderByExpr, Query, SelectExpr, SortDir, TableRef, TableSample};
pub use token::{Token, TokenStream};
