//! # rowsample
//!
//! Strategy-driven random row selection that compiles to multi-dialect SQL.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │            Sampler (table-bound entry point)             │
//! │      random(count) -> one record | unexecuted relation   │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [strategy resolver]
//! ┌─────────────────────────────────────────────────────────┐
//! │     auto -> tablesample | offset | order_by              │
//! │     (PostgreSQL asks the table size estimator)           │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [plan builder]
//! ┌─────────────────────────────────────────────────────────┐
//! │                  Query (SQL builder)                     │
//! │  TABLESAMPLE BERNOULLI | LIMIT/OFFSET | ORDER BY RANDOM() │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [session]
//! ┌─────────────────────────────────────────────────────────┐
//! │        PostgreSQL / MySQL / SQLite / other engines       │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use rowsample::prelude::*;
//!
//! let session = Arc::new(SqliteSession::open("app.db")?);
//! let sampler = Sampler::for_record::<Person>(session.clone());
//!
//! if let Some(person) = sampler.random::<Person>(1).await?.into_record() {
//!     println!("picked {}", person.name);
//! }
//! ```

pub mod config;
pub mod logging;
pub mod record;
pub mod sampling;
pub mod session;
pub mod sql;

// Re-export SQL submodules at crate level
pub use sql::dialect;
pub use sql::expr;
pub use sql::query;
pub use sql::token;

pub use config::{configuration, configure, reset_configuration, SamplingConfig, SettingsError};
pub use record::Record;
pub use sampling::{RandomRequest, Relation, Sample, Sampler, Strategy};
pub use session::{Row, Session, SessionError, SessionResult};

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::config::{configuration, configure, reset_configuration, SamplingConfig};
    pub use crate::dialect::{Dialect, SqlDialect};
    pub use crate::expr::{col, lit_bool, lit_int, lit_str, ExprExt};
    pub use crate::query::OrderByExpr;
    pub use crate::record::Record;
    pub use crate::sampling::{RandomRequest, Relation, Sample, Sampler, Strategy};
    pub use crate::session::{
        Row, ScriptedSession, Session, SessionError, SessionResult, SqliteSession,
    };
}
