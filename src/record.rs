//! Table-bound record types.

use crate::session::{Row, SessionResult};

/// A type stored in one table and decodable from its rows.
///
/// # Example
///
/// ```ignore
/// #[derive(Deserialize)]
/// struct Person {
///     id: i64,
///     name: String,
/// }
///
/// impl Record for Person {
///     const TABLE_NAME: &'static str = "people";
///
///     fn from_row(row: &Row) -> SessionResult<Self> {
///         row.deserialize()
///     }
/// }
/// ```
pub trait Record: Sized + Send {
    /// Table the records live in.
    const TABLE_NAME: &'static str;

    /// Decode one result row.
    fn from_row(row: &Row) -> SessionResult<Self>;
}

/// Untyped access: a [`Row`] decodes to itself.
///
/// `Row` has no table of its own, so it is only useful with a sampler that
/// was bound to a table explicitly.
impl Record for Row {
    const TABLE_NAME: &'static str = "";

    fn from_row(row: &Row) -> SessionResult<Self> {
        Ok(row.clone())
    }
}
