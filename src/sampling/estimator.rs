//! Table cardinality estimation.
//!
//! PostgreSQL and MySQL keep planner statistics that answer "roughly how
//! many rows" without scanning the table. Other engines get an exact
//! `COUNT(*)`. Estimates may be stale; callers only use them to pick a
//! strategy and bound a random offset.

use dashmap::DashMap;
use tracing::{debug, trace};

use crate::dialect::{Dialect, SqlDialect};
use crate::expr::{col, func, lit_str, raw_sql, ExprExt};
use crate::query::{Query, TableRef};
use crate::session::{coerce_count, Row, Session, SessionResult};

/// Per-table size cache.
///
/// Entries are never invalidated by writes to the table; they live until
/// [`SizeCache::invalidate`], [`SizeCache::clear`] or the cache is dropped.
#[derive(Debug, Default)]
pub struct SizeCache {
    sizes: DashMap<String, u64>,
}

impl SizeCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, table: &str) -> Option<u64> {
        self.sizes.get(table).map(|entry| *entry.value())
    }

    pub fn insert(&self, table: &str, size: u64) {
        self.sizes.insert(table.to_string(), size);
    }

    pub fn invalidate(&self, table: &str) {
        self.sizes.remove(table);
    }

    pub fn clear(&self) {
        self.sizes.clear();
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }
}

/// Where an estimate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstimateSource {
    Cache,
    Catalog,
    ExactCount,
}

impl EstimateSource {
    fn as_str(self) -> &'static str {
        match self {
            EstimateSource::Cache => "cache",
            EstimateSource::Catalog => "catalog",
            EstimateSource::ExactCount => "exact_count",
        }
    }
}

/// Estimates table row counts, optionally caching the results.
#[derive(Debug, Default)]
pub struct TableSizeEstimator {
    cache: Option<SizeCache>,
}

impl TableSizeEstimator {
    /// Create an estimator; `cache_enabled` controls whether results are kept.
    pub fn new(cache_enabled: bool) -> Self {
        Self {
            cache: cache_enabled.then(SizeCache::new),
        }
    }

    /// The cache, when caching is enabled.
    pub fn cache(&self) -> Option<&SizeCache> {
        self.cache.as_ref()
    }

    /// Drop the cached size of one table.
    pub fn invalidate(&self, table: &str) {
        if let Some(cache) = &self.cache {
            cache.invalidate(table);
        }
    }

    /// Drop every cached size.
    pub fn clear(&self) {
        if let Some(cache) = &self.cache {
            cache.clear();
        }
    }

    /// Estimated number of rows in `table`.
    ///
    /// A failing catalog lookup is logged and replaced by an exact count;
    /// only a failing exact count is returned as an error.
    pub async fn estimate<S>(&self, session: &S, table: &str) -> SessionResult<u64>
    where
        S: Session + ?Sized,
    {
        self.estimate_with_source(session, table)
            .await
            .map(|(size, _)| size)
    }

    /// Like [`estimate`](Self::estimate), also reporting where the number came from.
    pub async fn estimate_with_source<S>(
        &self,
        session: &S,
        table: &str,
    ) -> SessionResult<(u64, EstimateSource)>
    where
        S: Session + ?Sized,
    {
        if let Some(size) = self.cache.as_ref().and_then(|c| c.get(table)) {
            trace!(table, size, "table size cache hit");
            return Ok((size, EstimateSource::Cache));
        }

        let (size, source) = compute(session, table).await?;
        debug!(table, size, source = source.as_str(), "estimated table size");

        if let Some(cache) = &self.cache {
            cache.insert(table, size);
        }
        Ok((size, source))
    }
}

async fn compute<S>(session: &S, table: &str) -> SessionResult<(u64, EstimateSource)>
where
    S: Session + ?Sized,
{
    if let Some(sql) = catalog_query(session.dialect(), table) {
        match session.select_rows(&sql).await {
            Ok(rows) => match rows.first().and_then(Row::first) {
                Some(value) => return Ok((coerce_count(value), EstimateSource::Catalog)),
                None => debug!(table, "no catalog statistics row, counting instead"),
            },
            Err(err) => debug!(table, error = %err, "catalog estimate failed, counting instead"),
        }
    }

    let size = session.count(table).await?;
    Ok((size, EstimateSource::ExactCount))
}

/// Statistics-catalog lookup for engines that keep row estimates.
///
/// Returns `None` for engines without one; those always count exactly.
pub fn catalog_query(dialect: Dialect, table: &str) -> Option<String> {
    if !dialect.has_row_estimates() {
        return None;
    }

    let query = match dialect {
        Dialect::Postgres => Query::new()
            .select(vec![raw_sql("reltuples::BIGINT").alias("reltuples")])
            .from(TableRef::new("pg_class"))
            .filter(col("relname").eq(lit_str(table))),
        Dialect::MySql => Query::new()
            .select(vec![col("table_rows")])
            .from(TableRef::new("tables").with_schema("information_schema"))
            .filter(col("table_name").eq(lit_str(table)))
            .filter(col("table_schema").eq(func("DATABASE", vec![]))),
        Dialect::Sqlite | Dialect::Ansi => return None,
    };

    Some(query.to_sql(dialect))
}
