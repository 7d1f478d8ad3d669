//! Weekly and monthly attendance aggregates.
//!
//! Aggregates are projections of [`NormalizedRecord`](super::NormalizedRecord)s,
//! recomputed on demand and never stored on their own.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

use super::formats::date_format;
use super::tabular::Tabular;

/// Per-employee totals for one Monday-to-Sunday week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklyAggregate {
    /// The Monday that opens the week.
    #[serde(with = "date_format")]
    pub week_start: NaiveDate,
    /// The Sunday that closes the week (`week_start + 6 days`).
    #[serde(with = "date_format")]
    pub week_end: NaiveDate,
    /// Employee identifier.
    pub employee_id: String,
    /// Employee name.
    pub name: String,
    /// Sum of daily work hours.
    pub work_hours_total: Decimal,
    /// Sum of daily overtime hours.
    pub ot_total: Decimal,
    /// Number of distinct calendar days with at least one record.
    pub days_present: u32,
}

impl Tabular for WeeklyAggregate {
    const COLUMNS: &'static [&'static str] = &[
        "week_start",
        "week_end",
        "employee_id",
        "name",
        "work_hours_total",
        "ot_total",
        "days_present",
    ];
}

/// Per-employee totals for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyAggregate {
    /// The calendar month.
    pub month: Month,
    /// Employee identifier.
    pub employee_id: String,
    /// Employee name.
    pub name: String,
    /// Sum of daily work hours.
    pub work_hours_total: Decimal,
    /// Sum of daily overtime hours.
    pub ot_total: Decimal,
    /// Number of distinct calendar days with at least one record.
    pub days_present: u32,
}

impl Tabular for MonthlyAggregate {
    const COLUMNS: &'static [&'static str] = &[
        "month",
        "employee_id",
        "name",
        "work_hours_total",
        "ot_total",
        "days_present",
    ];
}

/// A year-month key, rendered as `YYYY-MM`.
///
/// # Example
///
/// ```
/// use attendance_engine::models::Month;
/// use chrono::NaiveDate;
///
/// let month = Month::of(NaiveDate::from_ymd_opt(2024, 7, 15).unwrap());
/// assert_eq!(month.to_string(), "2024-07");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    /// The month containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The month number, 1 through 12.
    pub fn month(&self) -> u32 {
        self.month
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for Month {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
