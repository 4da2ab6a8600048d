//! Result rows returned by a session.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use super::error::{SessionError, SessionResult};

/// One result row: ordered `(column, value)` pairs.
///
/// Values are carried as JSON values so every session implementation can
/// share one representation regardless of the driver's native types.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Row {
    columns: Vec<String>,
    values: Vec<Value>,
}

impl Row {
    /// Create a row from parallel column and value lists.
    ///
    /// Extra values or extra columns beyond the shorter list are dropped.
    pub fn new(columns: Vec<String>, values: Vec<Value>) -> Self {
        let len = columns.len().min(values.len());
        let mut columns = columns;
        let mut values = values;
        columns.truncate(len);
        values.truncate(len);
        Self { columns, values }
    }

    /// Create a row from `(column, value)` pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let (columns, values) = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .unzip();
        Self { columns, values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Value at a column position.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Value of the first column.
    pub fn first(&self) -> Option<&Value> {
        self.values.first()
    }

    /// Value by column name (first match, case-sensitive).
    pub fn get_by_name(&self, column: &str) -> Option<&Value> {
        self.columns
            .iter()
            .position(|c| c == column)
            .and_then(|i| self.values.get(i))
    }

    /// Decode one column into `T`.
    pub fn try_get<T: DeserializeOwned>(&self, column: &str) -> SessionResult<T> {
        let value = self
            .get_by_name(column)
            .ok_or_else(|| SessionError::decode(format!("missing column `{column}`")))?;
        serde_json::from_value(value.clone())
            .map_err(|e| SessionError::decode(format!("column `{column}`: {e}")))
    }

    /// The row as a JSON object keyed by column name.
    pub fn to_object(&self) -> Map<String, Value> {
        self.columns
            .iter()
            .cloned()
            .zip(self.values.iter().cloned())
            .collect()
    }

    /// Decode the whole row into `T` through its column names.
    pub fn deserialize<T: DeserializeOwned>(&self) -> SessionResult<T> {
        serde_json::from_value(Value::Object(self.to_object()))
            .map_err(|e| SessionError::decode(e.to_string()))
    }
}

/// Lenient row-count coercion used for catalog estimates and `COUNT(*)`.
///
/// Integers pass through, floats are truncated, numeric strings are parsed.
/// NULL, negative and non-numeric values count as 0.
pub fn coerce_count(value: &Value) -> u64 {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().and_then(truncate_positive))
            .unwrap_or(0),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<u64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(truncate_positive))
                .unwrap_or(0)
        }
        _ => 0,
    }
}

fn truncate_positive(f: f64) -> Option<u64> {
    if f.is_finite() && f > 0.0 {
        Some(f.trunc() as u64)
    } else {
        None
    }
}
