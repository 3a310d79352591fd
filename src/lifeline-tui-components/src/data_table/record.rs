//! Records and cell values.

use std::collections::HashSet;
use std::fmt;

use serde_json::{Map, Value};

/// A raw field value as the table sees it.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Missing or null field.
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// Text value
    Text(String),
}

impl CellValue {
    /// Whether the value is nullish.
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Text for display; `None` for nullish values.
    pub fn display(&self) -> Option<String> {
        match self {
            CellValue::Null => None,
            CellValue::Bool(b) => Some(if *b { "Yes" } else { "No" }.to_string()),
            CellValue::Int(n) => Some(n.to_string()),
            CellValue::Float(n) => Some(n.to_string()),
            CellValue::Text(s) => Some(s.clone()),
        }
    }

    /// Borrow the text, if this is a text value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.display() {
            Some(text) => f.write_str(&text),
            None => Ok(()),
        }
    }
}

impl From<&Value> for CellValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => CellValue::Null,
            Value::Bool(b) => CellValue::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => CellValue::Int(i),
                None => CellValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => CellValue::Text(s.clone()),
            // Nested data is shown as compact JSON.
            Value::Array(_) | Value::Object(_) => CellValue::Text(value.to_string()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Int(n)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Float(n)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(CellValue::Null, Into::into)
    }
}

/// A row the table can display.
///
/// Implemented for JSON objects; domain types implement it directly.
pub trait TableRecord {
    /// Value of the field named `key`; [`CellValue::Null`] when absent.
    fn field(&self, key: &str) -> CellValue;

    /// Stable identity of the row, if it has one.
    fn row_key(&self) -> Option<String> {
        None
    }
}

fn json_row_key(map: &Map<String, Value>) -> Option<String> {
    ["key", "id"].iter().find_map(|name| match map.get(*name)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    })
}

impl TableRecord for Map<String, Value> {
    fn field(&self, key: &str) -> CellValue {
        self.get(key).map_or(CellValue::Null, CellValue::from)
    }

    fn row_key(&self) -> Option<String> {
        json_row_key(self)
    }
}

impl TableRecord for Value {
    fn field(&self, key: &str) -> CellValue {
        self.get(key).map_or(CellValue::Null, CellValue::from)
    }

    fn row_key(&self) -> Option<String> {
        self.as_object().and_then(json_row_key)
    }
}

/// Identity of a rendered row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RowKey {
    /// The record's own key.
    Key(String),
    /// Position in `data`, for rows without a usable key.
    Position(usize),
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowKey::Key(key) => f.write_str(key),
            RowKey::Position(index) => write!(f, "#{index}"),
        }
    }
}

/// Assign a key to every row. Rows without a key, or repeating an earlier
/// row's key, fall back to their position.
pub fn row_keys<R: TableRecord>(data: &[R]) -> Vec<RowKey> {
    let mut seen = HashSet::new();
    data.iter()
        .enumerate()
        .map(|(index, record)| match record.row_key() {
            Some(key) if seen.insert(key.clone()) => RowKey::Key(key),
            Some(key) => {
                tracing::debug!(%key, index, "Duplicate row key, using position");
                RowKey::Position(index)
            }
            None => RowKey::Position(index),
        })
        .collect()
}
