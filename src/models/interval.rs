//! Elapsed work interval.

use chrono::{Duration, NaiveDateTime};
use rust_decimal::Decimal;

use crate::error::{AttendanceError, AttendanceResult};

/// A start and end timestamp pair with `end >= start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl Interval {
    /// Creates an interval, failing if `end` precedes `start`.
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_engine::models::Interval;
    /// use chrono::NaiveDateTime;
    /// use rust_decimal::Decimal;
    ///
    /// let start = NaiveDateTime::parse_from_str("2024-07-01 08:30", "%Y-%m-%d %H:%M").unwrap();
    /// let end = NaiveDateTime::parse_from_str("2024-07-01 18:00", "%Y-%m-%d %H:%M").unwrap();
    /// let interval = Interval::new(start, end).unwrap();
    /// assert_eq!(interval.hours(), Decimal::new(95, 1));
    /// assert!(Interval::new(end, start).is_err());
    /// ```
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> AttendanceResult<Self> {
        if end < start {
            return Err(AttendanceError::InvalidInterval {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// The start timestamp.
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// The end timestamp.
    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// The elapsed duration.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Elapsed time in (fractional) hours.
    pub fn hours(&self) -> Decimal {
        duration_hours(self.duration())
    }

    /// The overlapping duration of two intervals; zero when they only touch or are disjoint.
    pub fn overlap(&self, other: &Interval) -> Duration {
        let latest_start = self.start.max(other.start);
        let earliest_end = self.end.min(other.end);
        if earliest_end <= latest_start {
            return Duration::zero();
        }
        earliest_end - latest_start
    }
}

/// Converts a duration to hours at minute resolution.
fn duration_hours(duration: Duration) -> Decimal {
    Decimal::new(duration.num_minutes(), 0) / Decimal::new(60, 0)
}
