//! Flattening of break representations into hour counts.

use rust_decimal::Decimal;
use serde_json::Value;

use crate::error::{AttendanceError, AttendanceResult};
use crate::models::{BreakInput, BreakItem, parse_decimal};

/// Flattens any [`BreakInput`] into an ordered list of non-negative hours.
///
/// - `Absent` yields an empty list.
/// - `Hours` yields a one-element list.
/// - `Text` is decoded as JSON first (an array, or a single value); if it is
///   not valid JSON it is split on `,` and `;` and each trimmed token parsed.
///   Blank text yields an empty list.
/// - `List` converts every item.
///
/// Any negative value fails with [`AttendanceError::NegativeBreak`].
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::normalize_breaks;
/// use attendance_engine::models::BreakInput;
/// use rust_decimal::Decimal;
///
/// let hours = normalize_breaks(&BreakInput::Text("0.5; 0.25".to_string())).unwrap();
/// assert_eq!(hours, vec![Decimal::new(5, 1), Decimal::new(25, 2)]);
///
/// let hours = normalize_breaks(&BreakInput::Text("[1, 0.5]".to_string())).unwrap();
/// assert_eq!(hours, vec![Decimal::new(1, 0), Decimal::new(5, 1)]);
/// ```
pub fn normalize_breaks(input: &BreakInput) -> AttendanceResult<Vec<Decimal>> {
    match input {
        BreakInput::Absent => Ok(Vec::new()),
        BreakInput::Hours(hours) => Ok(vec![non_negative(*hours)?]),
        BreakInput::Text(text) => normalize_text(text),
        BreakInput::List(items) => items.iter().map(item_hours).collect(),
    }
}

fn normalize_text(text: &str) -> AttendanceResult<Vec<Decimal>> {
    let cleaned = text.trim();
    if cleaned.is_empty() {
        return Ok(Vec::new());
    }

    match serde_json::from_str::<Value>(cleaned) {
        Ok(Value::Array(values)) => values.iter().map(decoded_hours).collect(),
        Ok(value) => Ok(vec![decoded_hours(&value)?]),
        Err(_) => cleaned
            .split([',', ';'])
            .map(|token| item_hours(&BreakItem::Text(token.to_string())))
            .collect(),
    }
}

fn decoded_hours(value: &Value) -> AttendanceResult<Decimal> {
    item_hours(&BreakItem::from_value(value)?)
}

fn item_hours(item: &BreakItem) -> AttendanceResult<Decimal> {
    let hours = match item {
        BreakItem::Hours(hours) => *hours,
        BreakItem::Text(text) => {
            parse_decimal(text).ok_or_else(|| AttendanceError::InvalidBreakValue {
                value: text.trim().to_string(),
            })?
        }
    };
    non_negative(hours)
}

fn non_negative(hours: Decimal) -> AttendanceResult<Decimal> {
    if hours.is_sign_negative() && !hours.is_zero() {
        return Err(AttendanceError::NegativeBreak { value: hours });
    }
    Ok(hours)
}
