//! Unmaterialized, typed query handles.

use std::fmt;
use std::marker::PhantomData;

use crate::dialect::Dialect;
use crate::expr::Expr;
use crate::query::{OrderByExpr, Query};
use crate::record::Record;
use crate::session::{Session, SessionResult};

/// A query over `T`'s table that has not run yet.
///
/// Refining methods consume the relation and return a new one; nothing
/// touches the database until [`load`](Relation::load) or
/// [`first`](Relation::first).
pub struct Relation<T> {
    query: Query,
    dialect: Dialect,
    _record: PhantomData<fn() -> T>,
}

impl<T> Relation<T> {
    pub fn new(query: Query, dialect: Dialect) -> Self {
        Self {
            query,
            dialect,
            _record: PhantomData,
        }
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn into_query(self) -> Query {
        self.query
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// SQL for the relation's dialect.
    pub fn to_sql(&self) -> String {
        self.query.to_sql(self.dialect)
    }

    pub fn limit_value(&self) -> Option<u64> {
        self.query.limit_value()
    }

    pub fn offset_value(&self) -> Option<u64> {
        self.query.offset_value()
    }

    /// Whether the plan samples with `TABLESAMPLE`.
    pub fn uses_tablesample(&self) -> bool {
        self.query.has_table_sample()
    }

    /// Add a WHERE condition (ANDed with existing conditions).
    pub fn filter(self, condition: Expr) -> Self {
        self.map(|q| q.filter(condition))
    }

    pub fn limit(self, limit: u64) -> Self {
        self.map(|q| q.limit(limit))
    }

    pub fn offset(self, offset: u64) -> Self {
        self.map(|q| q.offset(offset))
    }

    /// Replace the ORDER BY clause.
    pub fn order_by(self, exprs: Vec<OrderByExpr>) -> Self {
        self.map(|q| q.order_by(exprs))
    }

    fn map(self, f: impl FnOnce(Query) -> Query) -> Self {
        Self::new(f(self.query), self.dialect)
    }
}

impl<T: Record> Relation<T> {
    /// Run the query and decode every row.
    pub async fn load<S>(&self, session: &S) -> SessionResult<Vec<T>>
    where
        S: Session + ?Sized,
    {
        let rows = session.select_rows(&self.to_sql()).await?;
        rows.iter().map(T::from_row).collect()
    }

    /// Run the query limited to one row and decode it.
    ///
    /// Any offset in the plan is kept, and the limit is only ever narrowed:
    /// a `LIMIT 0` relation yields `None`.
    pub async fn first<S>(&self, session: &S) -> SessionResult<Option<T>>
    where
        S: Session + ?Sized,
    {
        let limit = self.limit_value().map_or(1, |l| l.min(1));
        let sql = self.query.clone().limit(limit).to_sql(self.dialect);
        let rows = session.select_rows(&sql).await?;
        rows.first().map(T::from_row).transpose()
    }
}

impl<T> Clone for Relation<T> {
    fn clone(&self) -> Self {
        Self::new(self.query.clone(), self.dialect)
    }
}

impl<T> fmt::Debug for Relation<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Relation")
            .field("dialect", &self.dialect)
            .field("sql", &self.to_sql())
            .finish()
    }
}

impl<T> fmt::Display for Relation<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}
