//! Sampling strategies and the rules that pick one.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::SamplingConfig;
use crate::dialect::Dialect;

/// How random rows are selected.
///
/// Parsing never fails: a name this crate does not recognise becomes
/// [`Strategy::Unknown`], which the resolver passes through untouched and
/// the plan builder treats like `Offset`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Strategy {
    /// Pick per engine and table size.
    #[default]
    Auto,
    /// PostgreSQL `TABLESAMPLE BERNOULLI`.
    Tablesample,
    /// Random `OFFSET` into the table.
    Offset,
    /// `ORDER BY RANDOM()`; uniform, but sorts the whole table.
    OrderBy,
    /// Unrecognised name, kept verbatim.
    Unknown(String),
}

impl Strategy {
    /// Parse a strategy name (case-insensitive).
    ///
    /// `order_by`, `order-by` and `orderby` all map to [`Strategy::OrderBy`].
    pub fn parse(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "auto" => Strategy::Auto,
            "tablesample" => Strategy::Tablesample,
            "offset" => Strategy::Offset,
            "order_by" | "order-by" | "orderby" => Strategy::OrderBy,
            _ => Strategy::Unknown(name.to_string()),
        }
    }

    /// Canonical name.
    pub fn as_str(&self) -> &str {
        match self {
            Strategy::Auto => "auto",
            Strategy::Tablesample => "tablesample",
            Strategy::Offset => "offset",
            Strategy::OrderBy => "order_by",
            Strategy::Unknown(name) => name,
        }
    }

    pub fn is_auto(&self) -> bool {
        matches!(self, Strategy::Auto)
    }
}

impl FromStr for Strategy {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Strategy::parse(s))
    }
}

impl From<&str> for Strategy {
    fn from(s: &str) -> Self {
        Strategy::parse(s)
    }
}

impl From<String> for Strategy {
    fn from(s: String) -> Self {
        Strategy::parse(&s)
    }
}

impl From<Strategy> for String {
    fn from(s: Strategy) -> Self {
        s.as_str().to_string()
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Resolution
// =============================================================================

/// Outcome of resolving a strategy before any table-size lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Strategy decided.
    Resolved(Strategy),
    /// PostgreSQL auto-selection: decide with [`StrategyResolver::choose_by_size`].
    NeedsEstimate,
}

/// Turns a requested strategy into a concrete one.
///
/// Rules, in order:
///
/// 1. Anything other than `Auto` is returned unchanged, `Unknown` included.
/// 2. `Auto` with a non-auto configured default returns that default.
/// 3. Otherwise by engine: PostgreSQL compares the table estimate with the
///    threshold, MySQL and SQLite use `Offset`, unrecognised engines use
///    `OrderBy`.
#[derive(Debug, Clone, Copy)]
pub struct StrategyResolver<'a> {
    config: &'a SamplingConfig,
}

impl<'a> StrategyResolver<'a> {
    pub fn new(config: &'a SamplingConfig) -> Self {
        Self { config }
    }

    /// Resolve without touching the database.
    pub fn resolve_static(&self, requested: &Strategy, dialect: Dialect) -> Resolution {
        if !requested.is_auto() {
            return Resolution::Resolved(requested.clone());
        }

        if !self.config.default_strategy.is_auto() {
            return Resolution::Resolved(self.config.default_strategy.clone());
        }

        match dialect {
            Dialect::Postgres => Resolution::NeedsEstimate,
            Dialect::MySql | Dialect::Sqlite => Resolution::Resolved(Strategy::Offset),
            Dialect::Ansi => Resolution::Resolved(Strategy::OrderBy),
        }
    }

    /// PostgreSQL auto-selection: tablesample only strictly above the threshold.
    pub fn choose_by_size(&self, estimate: u64) -> Strategy {
        let strategy = if estimate > self.config.tablesample_threshold {
            Strategy::Tablesample
        } else {
            Strategy::Offset
        };
        debug!(
            estimate,
            threshold = self.config.tablesample_threshold,
            strategy = %strategy,
            "chose strategy by table size"
        );
        strategy
    }
}
