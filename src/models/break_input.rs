//! Break representations accepted at the input boundary.

use rust_decimal::Decimal;
use serde_json::Value;

use crate::error::{AttendanceError, AttendanceResult};

use super::raw_row::decimal_from_number;

/// The shapes in which break durations (in hours) may arrive.
///
/// The variant is chosen once, at the boundary, by [`BreakInput::from_value`].
/// Everything downstream only ever sees the flattened list produced by
/// [`normalize_breaks`](crate::calculation::normalize_breaks).
#[derive(Debug, Clone, PartialEq)]
pub enum BreakInput {
    /// No break recorded.
    Absent,
    /// A single duration.
    Hours(Decimal),
    /// Text: a JSON array, or values separated by `,` or `;`.
    Text(String),
    /// An explicit collection of durations.
    List(Vec<BreakItem>),
}

/// One element of a [`BreakInput::List`].
#[derive(Debug, Clone, PartialEq)]
pub enum BreakItem {
    /// A numeric duration.
    Hours(Decimal),
    /// A numeric string, parsed during normalization.
    Text(String),
}

impl BreakInput {
    /// Inspects a raw value and selects the matching representation.
    ///
    /// Booleans, objects and nested collections are rejected as unsupported.
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_engine::models::BreakInput;
    /// use rust_decimal::Decimal;
    /// use serde_json::json;
    ///
    /// assert_eq!(BreakInput::from_value(&json!(null)).unwrap(), BreakInput::Absent);
    /// assert_eq!(
    ///     BreakInput::from_value(&json!(1)).unwrap(),
    ///     BreakInput::Hours(Decimal::new(1, 0))
    /// );
    /// assert!(BreakInput::from_value(&json!({"lunch": 1})).is_err());
    /// ```
    pub fn from_value(value: &Value) -> AttendanceResult<Self> {
        match value {
            Value::Null => Ok(BreakInput::Absent),
            Value::Number(n) => decimal_from_number(n)
                .map(BreakInput::Hours)
                .ok_or_else(|| unsupported(value)),
            Value::String(s) => Ok(BreakInput::Text(s.clone())),
            Value::Array(items) => items
                .iter()
                .map(BreakItem::from_value)
                .collect::<AttendanceResult<Vec<_>>>()
                .map(BreakInput::List),
            Value::Bool(_) | Value::Object(_) => Err(unsupported(value)),
        }
    }
}

impl BreakItem {
    pub(crate) fn from_value(value: &Value) -> AttendanceResult<Self> {
        match value {
            Value::Number(n) => decimal_from_number(n)
                .map(BreakItem::Hours)
                .ok_or_else(|| unsupported(value)),
            Value::String(s) => Ok(BreakItem::Text(s.clone())),
            _ => Err(unsupported(value)),
        }
    }
}

impl From<Decimal> for BreakInput {
    fn from(hours: Decimal) -> Self {
        BreakInput::Hours(hours)
    }
}

impl From<Vec<Decimal>> for BreakInput {
    fn from(hours: Vec<Decimal>) -> Self {
        BreakInput::List(hours.into_iter().map(BreakItem::Hours).collect())
    }
}

fn unsupported(value: &Value) -> AttendanceError {
    AttendanceError::UnsupportedBreak {
        found: value.to_string(),
    }
}
