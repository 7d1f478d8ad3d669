//! Normalized daily attendance record.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::formats::{date_format, time_format};
use super::tabular::Tabular;

/// A validated, immutable day of work for one employee.
///
/// Created by [`calc_work_hours`](crate::calculation::calc_work_hours) and
/// persisted as the durable daily record. All hour fields are rounded to two
/// decimal places and `0 <= work_hours <= 16`.
///
/// # Example
///
/// ```
/// use attendance_engine::models::{NormalizedRecord, Tabular};
///
/// assert_eq!(NormalizedRecord::COLUMNS[0], "date");
/// assert_eq!(NormalizedRecord::COLUMNS.len(), 9);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    /// The calendar day the shift started on.
    #[serde(with = "date_format")]
    pub date: NaiveDate,
    /// Employee identifier, trimmed.
    pub employee_id: String,
    /// Employee name, trimmed.
    pub name: String,
    /// Optional shift label; blank labels are stored as `None`.
    pub shift_label: Option<String>,
    /// Clock-in time of day.
    #[serde(with = "time_format")]
    pub clock_in: NaiveTime,
    /// Clock-out time of day (possibly on the following calendar day).
    #[serde(with = "time_format")]
    pub clock_out: NaiveTime,
    /// Sum of all breaks in hours.
    pub break_total: Decimal,
    /// Overtime hours added on top of the clocked interval.
    pub ot_hours: Decimal,
    /// Net worked hours: interval - breaks + overtime.
    pub work_hours: Decimal,
}

impl Tabular for NormalizedRecord {
    const COLUMNS: &'static [&'static str] = &[
        "date",
        "employee_id",
        "name",
        "shift_label",
        "clock_in",
        "clock_out",
        "break_total",
        "ot_hours",
        "work_hours",
    ];
}
