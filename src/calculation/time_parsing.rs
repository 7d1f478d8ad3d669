//! Parsing of boundary date and time strings.
//!
//! Both parsers fail closed: the text must match the fixed pattern exactly
//! (after trimming surrounding whitespace) and name a real date or time.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{AttendanceError, AttendanceResult};

/// The boundary date format, `DD/MM/YYYY`.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// The boundary time format, 24-hour `HH:MM`.
pub const TIME_FORMAT: &str = "%H:%M";

const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a strict 24-hour `HH:MM` string.
///
/// The result is anchored to 1900-01-01; callers combine its time-of-day with
/// the real work date.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::parse_time;
/// use chrono::Timelike;
///
/// let t = parse_time("08:30").unwrap();
/// assert_eq!((t.hour(), t.minute()), (8, 30));
/// assert!(parse_time("25:00").is_err());
/// assert!(parse_time("8:30").is_err());
/// ```
pub fn parse_time(text: &str) -> AttendanceResult<NaiveDateTime> {
    let trimmed = text.trim();
    let invalid = || AttendanceError::InvalidTime {
        value: text.to_string(),
    };

    if !matches_pattern(trimmed, "dd:dd") {
        return Err(invalid());
    }
    let time = NaiveTime::parse_from_str(trimmed, TIME_FORMAT).map_err(|_| invalid())?;
    Ok(anchor_date().and_time(time))
}

/// Parses a strict `DD/MM/YYYY` string into a calendar date.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::parse_date;
/// use chrono::NaiveDate;
///
/// assert_eq!(
///     parse_date("01/07/2024").unwrap(),
///     NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()
/// );
/// assert!(parse_date("32/01/2024").is_err());
/// assert!(parse_date("2024-07-01").is_err());
/// ```
pub fn parse_date(text: &str) -> AttendanceResult<NaiveDate> {
    let trimmed = text.trim();
    let invalid = || AttendanceError::InvalidDate {
        value: text.to_string(),
    };

    if !matches_pattern(trimmed, "dd/dd/dddd") {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| invalid())
}

/// Parses a date held in a daily record: `DD/MM/YYYY`, or an already-parsed
/// date rendered in ISO `YYYY-MM-DD` form.
pub fn parse_daily_date(text: &str) -> AttendanceResult<NaiveDate> {
    parse_date(text).or_else(|err| {
        let trimmed = text.trim();
        if matches_pattern(trimmed, "dddd-dd-dd") {
            NaiveDate::parse_from_str(trimmed, ISO_DATE_FORMAT).map_err(|_| err)
        } else {
            Err(err)
        }
    })
}

/// Checks `text` against a pattern where `d` stands for one ASCII digit and
/// every other byte must match literally.
fn matches_pattern(text: &str, pattern: &str) -> bool {
    text.len() == pattern.len()
        && text.bytes().zip(pattern.bytes()).all(|(c, p)| match p {
            b'd' => c.is_ascii_digit(),
            _ => c == p,
        })
}

fn anchor_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1900, 1, 1).expect("Valid anchor date")
}
