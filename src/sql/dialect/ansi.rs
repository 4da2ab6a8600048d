//! ANSI SQL dialect - fallback for unrecognised engines.
//!
//! Any adapter name that does not map to a known engine family renders
//! through this dialect. It sticks to standard syntax: double-quoted
//! identifiers, `OFFSET ... ROWS FETCH FIRST ... ROWS ONLY`, and `RANDOM()`
//! for random ordering.

use super::super::token::{Token, TokenStream};

use super::helpers;
use super::SqlDialect;

/// ANSI SQL dialect (unknown-engine fallback).
#[derive(Debug, Clone, Copy)]
pub struct Ansi;

impl SqlDialect for Ansi {
    fn name(&self) -> &'static str {
        "ansi"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_double(ident)
    }

    fn format_bool(&self, b: bool) -> &'static str {
        if b { "TRUE" } else { "FALSE" }
    }

    fn emit_limit_offset(&self, limit: Option<u64>, offset: Option<u64>) -> TokenStream {
        // ANSI SQL uses FETCH FIRST / OFFSET
        let mut ts = TokenStream::new();

        if let Some(off) = offset {
            ts.push(Token::Offset)
                .space()
                .push(helpers::row_count_literal(off))
                .space()
                .push(Token::Rows);
        }

        if let Some(lim) = limit {
            if offset.is_some() {
                ts.space();
            }
            ts.push(Token::Fetch)
                .space()
                .push(Token::First)
                .space()
                .push(helpers::row_count_literal(lim))
                .space()
                .push(Token::Rows)
                .space()
                .push(Token::Only);
        }

        ts
    }
}
