//! Resolution of clock-in/clock-out times into an elapsed interval.

use chrono::{Duration, NaiveDate, NaiveTime};

use crate::error::AttendanceResult;
use crate::models::Interval;

/// Builds the worked interval for a shift that starts on `date`.
///
/// When the clock-out time is not after the clock-in time, the shift is taken
/// to cross midnight and the end is moved to the following calendar day.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::resolve_interval;
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal::Decimal;
///
/// let date = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
/// let clock_in = NaiveTime::from_hms_opt(19, 0, 0).unwrap();
/// let clock_out = NaiveTime::from_hms_opt(4, 0, 0).unwrap();
///
/// let interval = resolve_interval(date, clock_in, clock_out).unwrap();
/// assert_eq!(interval.end().date(), NaiveDate::from_ymd_opt(2024, 7, 2).unwrap());
/// assert_eq!(interval.hours(), Decimal::new(9, 0));
/// ```
pub fn resolve_interval(
    date: NaiveDate,
    clock_in: NaiveTime,
    clock_out: NaiveTime,
) -> AttendanceResult<Interval> {
    let start = date.and_time(clock_in);
    let mut end = date.and_time(clock_out);

    if end <= start {
        end += Duration::days(1);
    }

    Interval::new(start, end)
}
