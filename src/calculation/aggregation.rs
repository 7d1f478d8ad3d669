//! Daily, weekly and monthly summaries.
//!
//! Every summary is a pure projection: the input is never modified, the
//! output is freshly built, and identical input always yields identical
//! output. Weekly and monthly summaries are computed from the daily summary.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::Decimal;
use serde_json::Value;

use crate::error::{AttendanceError, AttendanceResult};
use crate::models::{
    Month, MonthlyAggregate, NormalizedRecord, RawRow, Tabular, WeeklyAggregate,
};

use super::time_parsing::{parse_daily_date, parse_time};
use super::work_hours::{
    check_break_total, check_net_hours, check_overtime, round_hours, sort_daily,
};

/// Something that can be reshaped into the canonical daily record.
///
/// Implemented for typed [`NormalizedRecord`]s and for [`RawRow`] mappings in
/// the daily schema (as loaded from storage or received over the wire).
pub trait DailySource: Sized {
    /// Validates batch-level structure before any row is reshaped.
    fn check_batch(_batch: &[Self]) -> AttendanceResult<()> {
        Ok(())
    }

    /// Reshapes one item into a canonical daily record.
    fn to_daily(&self) -> AttendanceResult<NormalizedRecord>;
}

impl DailySource for NormalizedRecord {
    fn to_daily(&self) -> AttendanceResult<NormalizedRecord> {
        validated(NormalizedRecord {
            employee_id: self.employee_id.trim().to_string(),
            name: self.name.trim().to_string(),
            shift_label: self
                .shift_label
                .as_deref()
                .map(str::trim)
                .filter(|label| !label.is_empty())
                .map(str::to_string),
            ..self.clone()
        })
    }
}

impl DailySource for RawRow {
    fn check_batch(batch: &[Self]) -> AttendanceResult<()> {
        let missing = RawRow::missing_columns(batch, NormalizedRecord::COLUMNS);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(AttendanceError::MissingColumns { columns: missing })
        }
    }

    fn to_daily(&self) -> AttendanceResult<NormalizedRecord> {
        let date = match self.required("date")? {
            Value::String(text) => parse_daily_date(text)?,
            other => {
                return Err(AttendanceError::InvalidDate {
                    value: other.to_string(),
                });
            }
        };

        validated(NormalizedRecord {
            date,
            employee_id: self.text("employee_id")?,
            name: self.text("name")?,
            shift_label: self.optional_text("shift_label"),
            clock_in: parse_time(&self.text("clock_in")?)?.time(),
            clock_out: parse_time(&self.text("clock_out")?)?.time(),
            break_total: self.decimal("break_total")?,
            ot_hours: self.decimal("ot_hours")?,
            work_hours: self.decimal("work_hours")?,
        })
    }
}

/// Applies the ingestion bounds to a daily record and rounds its hours.
fn validated(record: NormalizedRecord) -> AttendanceResult<NormalizedRecord> {
    check_break_total(record.break_total)?;
    check_overtime(record.ot_hours)?;
    check_net_hours(record.work_hours)?;
    Ok(NormalizedRecord {
        break_total: round_hours(record.break_total),
        ot_hours: round_hours(record.ot_hours),
        work_hours: round_hours(record.work_hours),
        ..record
    })
}

/// Re-shapes records into the canonical daily schema, sorted by
/// `(date, employee_id)`.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::{build_daily_summary, calc_work_hours};
/// use attendance_engine::models::RawRow;
///
/// let row = RawRow::new()
///     .with("date", "02/07/2024")
///     .with("employee_id", "E001")
///     .with("name", "Alice")
///     .with("clock_in", "08:00")
///     .with("clock_out", "17:00")
///     .with("breaks", 1)
///     .with("ot_hours", 0);
/// let records = calc_work_hours(&[row]).unwrap();
///
/// let daily = build_daily_summary(&records).unwrap();
/// assert_eq!(daily, records);
/// ```
pub fn build_daily_summary<S: DailySource>(records: &[S]) -> AttendanceResult<Vec<NormalizedRecord>> {
    S::check_batch(records)?;
    let mut daily = records
        .iter()
        .map(S::to_daily)
        .collect::<AttendanceResult<Vec<_>>>()?;
    sort_daily(&mut daily);
    Ok(daily)
}

/// Aggregates daily records into Monday-to-Sunday weeks per employee.
///
/// Rows are sorted by `(week_start, employee_id)`; within that, by name.
pub fn build_weekly_summary<S: DailySource>(records: &[S]) -> AttendanceResult<Vec<WeeklyAggregate>> {
    let daily = build_daily_summary(records)?;
    let weekly = group_totals(&daily, |record| week_start(record.date))?
        .into_iter()
        .map(|((week_start, employee_id, name), totals)| WeeklyAggregate {
            week_start,
            week_end: week_start + Duration::days(6),
            employee_id,
            name,
            work_hours_total: round_hours(totals.work_hours),
            ot_total: round_hours(totals.ot_hours),
            days_present: totals.days_present(),
        })
        .collect();
    Ok(weekly)
}

/// Aggregates daily records into calendar months per employee.
///
/// Rows are sorted by `(month, employee_id)`; within that, by name.
pub fn build_monthly_summary<S: DailySource>(
    records: &[S],
) -> AttendanceResult<Vec<MonthlyAggregate>> {
    let daily = build_daily_summary(records)?;
    let monthly = group_totals(&daily, |record| Month::of(record.date))?
        .into_iter()
        .map(|((month, employee_id, name), totals)| MonthlyAggregate {
            month,
            employee_id,
            name,
            work_hours_total: round_hours(totals.work_hours),
            ot_total: round_hours(totals.ot_hours),
            days_present: totals.days_present(),
        })
        .collect();
    Ok(monthly)
}

/// The Monday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

#[derive(Debug, Default)]
struct Totals {
    work_hours: Decimal,
    ot_hours: Decimal,
    days: BTreeSet<NaiveDate>,
}

impl Totals {
    fn add(&mut self, record: &NormalizedRecord) -> AttendanceResult<()> {
        self.work_hours = checked_sum(self.work_hours, record.work_hours, "work_hours_total")?;
        self.ot_hours = checked_sum(self.ot_hours, record.ot_hours, "ot_total")?;
        self.days.insert(record.date);
        Ok(())
    }

    fn days_present(&self) -> u32 {
        u32::try_from(self.days.len()).unwrap_or(u32::MAX)
    }
}

fn checked_sum(total: Decimal, hours: Decimal, field: &str) -> AttendanceResult<Decimal> {
    total
        .checked_add(hours)
        .ok_or_else(|| AttendanceError::HoursOutOfRange {
            field: field.to_string(),
            limit: Decimal::MAX,
        })
}

/// Groups daily records by `(period, employee_id, name)` and sums each group.
fn group_totals<K: Ord>(
    daily: &[NormalizedRecord],
    period: impl Fn(&NormalizedRecord) -> K,
) -> AttendanceResult<BTreeMap<(K, String, String), Totals>> {
    let mut groups: BTreeMap<(K, String, String), Totals> = BTreeMap::new();
    for record in daily {
        groups
            .entry((period(record), record.employee_id.clone(), record.name.clone()))
            .or_default()
            .add(record)?;
    }
    Ok(groups)
}
