//! The random-selection entry point.

use std::sync::Arc;

use tracing::{debug, instrument};

use super::estimator::TableSizeEstimator;
use super::plan::PlanBuilder;
use super::relation::Relation;
use super::strategy::{Resolution, Strategy, StrategyResolver};
use crate::config::{configuration, SamplingConfig, DEFAULT_PRECISION};
use crate::dialect::Dialect;
use crate::record::Record;
use crate::session::{Session, SessionResult};

/// Parameters of one random-selection call.
#[derive(Debug, Clone, PartialEq)]
pub struct RandomRequest {
    /// Number of rows wanted.
    pub count: u64,
    /// Requested strategy; `Auto` lets the resolver decide.
    pub strategy: Strategy,
    /// Bernoulli percentage for tablesample; the default defers to configuration.
    pub precision: f64,
}

impl Default for RandomRequest {
    fn default() -> Self {
        Self {
            count: 1,
            strategy: Strategy::Auto,
            precision: DEFAULT_PRECISION,
        }
    }
}

impl RandomRequest {
    pub fn new(count: u64) -> Self {
        Self {
            count,
            ..Self::default()
        }
    }

    pub fn with_strategy(mut self, strategy: impl Into<Strategy>) -> Self {
        self.strategy = strategy.into();
        self
    }

    pub fn with_precision(mut self, precision: f64) -> Self {
        self.precision = precision;
        self
    }
}

/// Result of a random selection.
#[derive(Debug)]
pub enum Sample<T> {
    /// `count == 1`: the record, or `None` for an empty table.
    One(Option<T>),
    /// Any other count: the plan, not yet executed.
    Many(Relation<T>),
}

impl<T> Sample<T> {
    pub fn is_one(&self) -> bool {
        matches!(self, Sample::One(_))
    }

    /// The single record, if this is a `One` holding one.
    pub fn into_record(self) -> Option<T> {
        match self {
            Sample::One(record) => record,
            Sample::Many(_) => None,
        }
    }

    /// The relation, if this is a `Many`.
    pub fn into_relation(self) -> Option<Relation<T>> {
        match self {
            Sample::One(_) => None,
            Sample::Many(relation) => Some(relation),
        }
    }
}

/// Random row selection bound to one table.
///
/// Each sampler owns its configuration snapshot and its own table-size
/// cache, so two samplers never observe each other's cached estimates.
///
/// # Example
///
/// ```ignore
/// let sampler = Sampler::for_record::<Person>(session.clone());
///
/// // One record (or None when the table is empty).
/// let person = sampler.random::<Person>(1).await?.into_record();
///
/// // A relation that can be refined before it runs.
/// let relation = sampler
///     .random_with::<Person>(RandomRequest::new(10).with_strategy("order_by"))
///     .await?
///     .into_relation();
/// ```
#[derive(Debug)]
pub struct Sampler<S: Session + ?Sized> {
    session: Arc<S>,
    table: String,
    config: SamplingConfig,
    estimator: TableSizeEstimator,
}

impl<S: Session + ?Sized> Sampler<S> {
    /// Sampler using a snapshot of the process-wide configuration.
    pub fn new(session: Arc<S>, table: impl Into<String>) -> Self {
        Self::with_config(session, table, configuration())
    }

    /// Sampler with an explicit configuration.
    pub fn with_config(session: Arc<S>, table: impl Into<String>, config: SamplingConfig) -> Self {
        let estimator = TableSizeEstimator::new(config.cache_table_sizes);
        Self {
            session,
            table: table.into(),
            config,
            estimator,
        }
    }

    /// Sampler over `T`'s table.
    pub fn for_record<T: Record>(session: Arc<S>) -> Self {
        Self::new(session, T::TABLE_NAME)
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn config(&self) -> &SamplingConfig {
        &self.config
    }

    pub fn session(&self) -> &Arc<S> {
        &self.session
    }

    pub fn dialect(&self) -> Dialect {
        self.session.dialect()
    }

    /// `count` random records with default strategy and precision.
    pub async fn random<T: Record>(&self, count: u64) -> SessionResult<Sample<T>> {
        self.random_with(RandomRequest::new(count)).await
    }

    /// Random records for a full request.
    ///
    /// A count of 1 runs the plan and returns the record; any other count
    /// returns the unexecuted relation.
    #[instrument(
        skip(self, request),
        fields(table = %self.table, count = request.count, strategy = %request.strategy)
    )]
    pub async fn random_with<T: Record>(&self, request: RandomRequest) -> SessionResult<Sample<T>> {
        let relation = self.plan::<T>(&request).await?;

        if request.count == 1 {
            let record = relation.first(self.session.as_ref()).await?;
            return Ok(Sample::One(record));
        }
        Ok(Sample::Many(relation))
    }

    /// The relation a request would produce, for any count.
    pub async fn plan<T>(&self, request: &RandomRequest) -> SessionResult<Relation<T>> {
        let strategy = self.resolve_strategy(&request.strategy).await?;
        let query = PlanBuilder::new(
            self.session.as_ref(),
            &self.table,
            &self.config,
            &self.estimator,
        )
        .build(&strategy, request.count, request.precision)
        .await?;

        Ok(Relation::new(query, self.dialect()))
    }

    /// Concrete strategy for a requested one.
    ///
    /// Only PostgreSQL auto-selection touches the database, for the table
    /// estimate.
    pub async fn resolve_strategy(&self, requested: &Strategy) -> SessionResult<Strategy> {
        let resolver = StrategyResolver::new(&self.config);
        let dialect = self.dialect();

        let strategy = match resolver.resolve_static(requested, dialect) {
            Resolution::Resolved(strategy) => strategy,
            Resolution::NeedsEstimate => {
                let estimate = self.estimate_table_size().await?;
                resolver.choose_by_size(estimate)
            }
        };

        debug!(
            table = %self.table,
            %dialect,
            requested = %requested,
            resolved = %strategy,
            "resolved sampling strategy"
        );
        Ok(strategy)
    }

    /// Estimated row count of the bound table.
    pub async fn estimate_table_size(&self) -> SessionResult<u64> {
        self.estimator
            .estimate(self.session.as_ref(), &self.table)
            .await
    }

    /// Forget the cached size of the bound table.
    pub fn reset_table_size_cache(&self) {
        self.estimator.invalidate(&self.table);
    }

    /// The estimator, for inspecting its cache.
    pub fn estimator(&self) -> &TableSizeEstimator {
        &self.estimator
    }
}
