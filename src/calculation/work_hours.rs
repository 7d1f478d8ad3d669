//! Work-hour calculation for raw attendance rows.
//!
//! Turns a batch of raw rows into validated [`NormalizedRecord`]s:
//! parse the date and clock times, resolve the worked interval, flatten the
//! breaks, add overtime and check the net result against the daily bounds.

use rust_decimal::Decimal;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{AttendanceError, AttendanceResult};
use crate::models::{BreakInput, NormalizedRecord, RawRow};

use super::break_normalization::normalize_breaks;
use super::interval_resolver::resolve_interval;
use super::time_parsing::{parse_date, parse_time};

/// Maximum net hours a single daily record may carry.
///
/// Anything above is rejected outright rather than flagged.
pub const MAX_NET_HOURS: Decimal = Decimal::from_parts(16, 0, 0, false, 0);

/// Largest break total or overtime figure a single record may carry: a full
/// 24-hour interval plus the daily cap.
pub const MAX_ENTRY_HOURS: Decimal = Decimal::from_parts(40, 0, 0, false, 0);

/// Columns every raw batch must provide. `shift_label` is optional.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "date",
    "employee_id",
    "name",
    "clock_in",
    "clock_out",
    "breaks",
    "ot_hours",
];

/// Normalizes a batch of raw attendance rows.
///
/// The whole batch fails on the first invalid row. Missing columns are
/// detected before any row is processed and reported together. The result is
/// sorted by `(date, employee_id)`; rows that tie keep their input order.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::calc_work_hours;
/// use attendance_engine::models::RawRow;
/// use rust_decimal::Decimal;
///
/// let row = RawRow::new()
///     .with("date", "01/07/2024")
///     .with("employee_id", "E002")
///     .with("name", "Bob")
///     .with("clock_in", "19:00")
///     .with("clock_out", "04:00")
///     .with("breaks", 1)
///     .with("ot_hours", 0);
///
/// let records = calc_work_hours(&[row]).unwrap();
/// assert_eq!(records[0].work_hours, Decimal::new(8, 0));
/// ```
pub fn calc_work_hours(rows: &[RawRow]) -> AttendanceResult<Vec<NormalizedRecord>> {
    let missing = RawRow::missing_columns(rows, &REQUIRED_COLUMNS);
    if !missing.is_empty() {
        warn!(columns = ?missing, "Attendance batch is missing required columns");
        return Err(AttendanceError::MissingColumns { columns: missing });
    }

    debug!(rows = rows.len(), "Normalizing attendance batch");

    let mut records = rows
        .iter()
        .enumerate()
        .map(|(index, row)| {
            normalize_row(row).inspect_err(|err| {
                warn!(
                    row = index,
                    employee_id = ?row.get("employee_id"),
                    error = %err,
                    "Rejected attendance row"
                );
            })
        })
        .collect::<AttendanceResult<Vec<_>>>()?;

    sort_daily(&mut records);
    Ok(records)
}

fn normalize_row(row: &RawRow) -> AttendanceResult<NormalizedRecord> {
    let date = parse_date(&row.text("date")?)?;
    let clock_in = parse_time(&row.text("clock_in")?)?.time();
    let clock_out = parse_time(&row.text("clock_out")?)?.time();
    let interval = resolve_interval(date, clock_in, clock_out)?;

    let breaks = BreakInput::from_value(row.get("breaks").unwrap_or(&Value::Null))?;
    let break_total = normalize_breaks(&breaks)?
        .iter()
        .try_fold(Decimal::ZERO, |total, hours| total.checked_add(*hours))
        .ok_or_else(|| out_of_range("breaks"))?;
    check_break_total(break_total)?;

    let ot_hours = row.decimal("ot_hours")?;
    check_overtime(ot_hours)?;

    // Both terms are bounded by MAX_ENTRY_HOURS, so this cannot overflow.
    let net_hours = interval.hours() - break_total + ot_hours;
    check_net_hours(net_hours)?;

    Ok(NormalizedRecord {
        date,
        employee_id: row.text("employee_id")?,
        name: row.text("name")?,
        shift_label: row.optional_text("shift_label"),
        clock_in: interval.start().time(),
        clock_out: interval.end().time(),
        break_total: round_hours(break_total),
        ot_hours: round_hours(ot_hours),
        work_hours: round_hours(net_hours),
    })
}

/// Checks a break total against `[0, MAX_ENTRY_HOURS]`.
pub(crate) fn check_break_total(break_total: Decimal) -> AttendanceResult<()> {
    if break_total < Decimal::ZERO {
        return Err(AttendanceError::NegativeBreak { value: break_total });
    }
    if break_total > MAX_ENTRY_HOURS {
        return Err(out_of_range("breaks"));
    }
    Ok(())
}

/// Checks overtime hours against `[0, MAX_ENTRY_HOURS]`.
pub(crate) fn check_overtime(ot_hours: Decimal) -> AttendanceResult<()> {
    if ot_hours < Decimal::ZERO {
        return Err(AttendanceError::NegativeOvertime { value: ot_hours });
    }
    if ot_hours > MAX_ENTRY_HOURS {
        return Err(out_of_range("ot_hours"));
    }
    Ok(())
}

fn out_of_range(field: &str) -> AttendanceError {
    AttendanceError::HoursOutOfRange {
        field: field.to_string(),
        limit: MAX_ENTRY_HOURS,
    }
}

/// Checks net hours against `[0, MAX_NET_HOURS]`.
pub(crate) fn check_net_hours(net_hours: Decimal) -> AttendanceResult<()> {
    if net_hours < Decimal::ZERO {
        return Err(AttendanceError::NegativeNetHours {
            hours: round_hours(net_hours),
        });
    }
    if net_hours > MAX_NET_HOURS {
        return Err(AttendanceError::ExcessiveNetHours {
            hours: round_hours(net_hours),
            limit: MAX_NET_HOURS,
        });
    }
    Ok(())
}

/// Rounds an hour figure to two decimal places (ties to even), dropping
/// trailing zeros so `8.00` renders as `8`.
pub(crate) fn round_hours(hours: Decimal) -> Decimal {
    hours.round_dp(2).normalize()
}

/// Stable sort by `(date, employee_id)`.
pub(crate) fn sort_daily(records: &mut [NormalizedRecord]) {
    records.sort_by(|a, b| (a.date, &a.employee_id).cmp(&(b.date, &b.employee_id)));
}
