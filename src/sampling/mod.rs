//! Random row selection.
//!
//! A call flows through three pieces:
//!
//! 1. [`StrategyResolver`] turns the requested [`Strategy`] into a concrete
//!    one, asking the [`TableSizeEstimator`] only for PostgreSQL auto-selection.
//! 2. [`PlanBuilder`] emits the query for that strategy.
//! 3. [`Sampler`] adapts the result shape: one record for `count == 1`,
//!    otherwise an unexecuted [`Relation`].
//!
//! | Engine | `auto` resolves to |
//! |--------|--------------------|
//! | PostgreSQL | `tablesample` above `tablesample_threshold` rows, else `offset` |
//! | MySQL | `offset` |
//! | SQLite | `offset` |
//! | anything else | `order_by` |

pub mod estimator;
pub mod plan;
pub mod relation;
pub mod sampler;
pub mod strategy;

pub use estimator::{catalog_query, EstimateSource, SizeCache, TableSizeEstimator};
pub use plan::{offset_plan, order_by_plan, resolve_precision, tablesample_plan, PlanBuilder};
pub use relation::Relation;
pub use sampler::{RandomRequest, Sample, Sampler};
pub use strategy::{Resolution, Strategy, StrategyResolver};
