//! Query plan builders for each sampling strategy.
//!
//! Every plan is `SELECT * FROM table` plus strategy-specific clauses:
//!
//! | Strategy | Clauses |
//! |----------|---------|
//! | tablesample | `TABLESAMPLE BERNOULLI (p)`, `LIMIT count` |
//! | offset | `LIMIT count OFFSET k`, `k` uniform in `[0, total - count]` |
//! | order_by | `ORDER BY RANDOM()` (`RAND()` on MySQL), `LIMIT count` |

use rand::Rng;
use tracing::{debug, warn};

use super::estimator::TableSizeEstimator;
use super::strategy::Strategy;
use crate::config::{SamplingConfig, DEFAULT_PRECISION};
use crate::dialect::{Dialect, SqlDialect};
use crate::expr::random;
use crate::query::{OrderByExpr, Query, TableRef};
use crate::session::{Session, SessionResult};

/// Bernoulli percentage for a tablesample plan.
///
/// A request still at the default sentinel takes the configured precision;
/// any other finite, non-negative value is used as given (`0` is a legal
/// `BERNOULLI (0)`). Negative or non-finite requests fall back to the
/// configured precision, and an unusable configuration falls back to the
/// default.
pub fn resolve_precision(requested: f64, config: &SamplingConfig) -> f64 {
    if requested != DEFAULT_PRECISION {
        if requested.is_finite() && requested >= 0.0 {
            return requested;
        }
        debug!(requested, configured = config.precision, "unusable precision, using configured value");
    }

    if config.precision.is_finite() && config.precision > 0.0 {
        config.precision
    } else {
        DEFAULT_PRECISION
    }
}

fn select_all(table: TableRef) -> Query {
    Query::new().select_star().from(table)
}

/// `SELECT * FROM table TABLESAMPLE BERNOULLI (precision) LIMIT count`.
pub fn tablesample_plan(table: &str, count: u64, precision: f64) -> Query {
    select_all(TableRef::new(table).bernoulli(precision)).limit(count)
}

/// Random-offset plan over a table of `total` rows.
///
/// An empty table gets a bare `LIMIT`. Otherwise the offset is drawn
/// uniformly from `[0, total - count]` (saturating at 0) and is always
/// emitted, even when it is 0.
pub fn offset_plan<R>(table: &str, count: u64, total: u64, rng: &mut R) -> Query
where
    R: Rng,
{
    let query = select_all(TableRef::new(table)).limit(count);
    if total == 0 {
        return query;
    }

    let max_offset = total.saturating_sub(count);
    let offset = if max_offset == 0 {
        0
    } else {
        rng.random_range(0..=max_offset)
    };
    query.offset(offset)
}

/// `SELECT * FROM table ORDER BY RANDOM() LIMIT count`.
pub fn order_by_plan(table: &str, count: u64) -> Query {
    select_all(TableRef::new(table))
        .order_by(vec![OrderByExpr::new(random())])
        .limit(count)
}

/// Builds the plan for a resolved strategy against one table.
pub struct PlanBuilder<'a, S: Session + ?Sized> {
    session: &'a S,
    table: &'a str,
    config: &'a SamplingConfig,
    estimator: &'a TableSizeEstimator,
}

impl<'a, S: Session + ?Sized> PlanBuilder<'a, S> {
    pub fn new(
        session: &'a S,
        table: &'a str,
        config: &'a SamplingConfig,
        estimator: &'a TableSizeEstimator,
    ) -> Self {
        Self {
            session,
            table,
            config,
            estimator,
        }
    }

    /// Build the plan for `strategy`.
    ///
    /// `Auto` and unrecognised strategies get the offset plan, as does
    /// tablesample on engines without `TABLESAMPLE`.
    pub async fn build(&self, strategy: &Strategy, count: u64, precision: f64) -> SessionResult<Query> {
        let dialect = self.session.dialect();

        let query = match strategy {
            Strategy::Tablesample if dialect.supports_tablesample() => {
                let precision = resolve_precision(precision, self.config);
                tablesample_plan(self.table, count, precision)
            }
            Strategy::Tablesample => {
                debug!(%dialect, "engine has no TABLESAMPLE, using offset plan");
                self.offset(count).await?
            }
            Strategy::Offset | Strategy::Auto => self.offset(count).await?,
            Strategy::OrderBy => order_by_plan(self.table, count),
            Strategy::Unknown(name) => {
                warn!(strategy = %name, "unknown sampling strategy, using offset plan");
                self.offset(count).await?
            }
        };

        debug!(table = self.table, sql = %query.to_sql(dialect), "built sampling plan");
        Ok(query)
    }

    async fn offset(&self, count: u64) -> SessionResult<Query> {
        let total = self.estimator.estimate(self.session, self.table).await?;
        // ThreadRng is !Send; it must not live across an await.
        let mut rng = rand::rng();
        Ok(offset_plan(self.table, count, total, &mut rng))
    }

    /// The dialect the plan renders in.
    pub fn dialect(&self) -> Dialect {
        self.session.dialect()
    }
}
