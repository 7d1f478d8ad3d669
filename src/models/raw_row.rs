//! Raw input rows.
//!
//! A [`RawRow`] is one mapping from column name to value, exactly as a
//! collaborator (CSV import, HTTP request, prompt) hands it over. Values are
//! inspected here, at the boundary, and converted into typed values before
//! any calculation happens.

use std::collections::BTreeSet;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::error::{AttendanceError, AttendanceResult};

/// One row of tabular input: column name to JSON-like value.
///
/// # Example
///
/// ```
/// use attendance_engine::models::RawRow;
///
/// let row = RawRow::new()
///     .with("date", "01/07/2024")
///     .with("employee_id", "E001")
///     .with("breaks", 1);
/// assert!(row.contains("date"));
/// assert!(!row.contains("ot_hours"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRow(Map<String, Value>);

impl RawRow {
    /// Creates an empty row.
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Returns the row with `column` set to `value`.
    pub fn with(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.insert(column, value);
        self
    }

    /// Sets `column` to `value`, replacing any previous value.
    pub fn insert(&mut self, column: &str, value: impl Into<Value>) {
        self.0.insert(column.to_string(), value.into());
    }

    /// Returns the value stored under `column`, if the column is present.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.0.get(column)
    }

    /// True when the column is present (even if its value is null).
    pub fn contains(&self, column: &str) -> bool {
        self.0.contains_key(column)
    }

    /// Iterates over the column names present in this row.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Returns every column of `required` that no row in `rows` carries, sorted.
    ///
    /// An empty batch has no columns to check and reports nothing missing.
    pub fn missing_columns(rows: &[RawRow], required: &[&str]) -> Vec<String> {
        if rows.is_empty() {
            return Vec::new();
        }
        let present: BTreeSet<&str> = rows.iter().flat_map(RawRow::columns).collect();
        let mut missing: Vec<String> = required
            .iter()
            .filter(|column| !present.contains(**column))
            .map(|column| column.to_string())
            .collect();
        missing.sort();
        missing
    }

    /// Returns the value of a column that must be present and non-null.
    pub(crate) fn required(&self, column: &str) -> AttendanceResult<&Value> {
        match self.0.get(column) {
            Some(Value::Null) | None => Err(AttendanceError::invalid_field(column, "is required")),
            Some(value) => Ok(value),
        }
    }

    /// Reads a column as trimmed text. Numbers are accepted and rendered.
    pub(crate) fn text(&self, column: &str) -> AttendanceResult<String> {
        match self.required(column)? {
            Value::String(s) => Ok(s.trim().to_string()),
            Value::Number(n) => Ok(n.to_string()),
            _ => Err(AttendanceError::invalid_field(column, "must be text")),
        }
    }

    /// Reads an optional label: null, absent or blank all yield `None`.
    pub(crate) fn optional_text(&self, column: &str) -> Option<String> {
        let text = match self.0.get(column)? {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            _ => return None,
        };
        (!text.is_empty()).then_some(text)
    }

    /// Reads a column holding a number or a numeric string.
    pub(crate) fn decimal(&self, column: &str) -> AttendanceResult<Decimal> {
        let parsed = match self.required(column)? {
            Value::Number(n) => decimal_from_number(n),
            Value::String(s) => parse_decimal(s),
            _ => None,
        };
        parsed.ok_or_else(|| AttendanceError::invalid_field(column, "must be numeric"))
    }
}

impl From<Map<String, Value>> for RawRow {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Parses numeric text, accepting plain and scientific notation.
pub(crate) fn parse_decimal(text: &str) -> Option<Decimal> {
    let text = text.trim();
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

/// Converts a JSON number into a decimal without going through binary floats.
pub(crate) fn decimal_from_number(number: &Number) -> Option<Decimal> {
    parse_decimal(&number.to_string())
}
