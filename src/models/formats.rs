//! Serde adapters for the boundary date and time formats.
//!
//! Dates cross the boundary as `DD/MM/YYYY` and times as `HH:MM`. When
//! reading, dates in ISO `YYYY-MM-DD` form are also accepted so that values
//! already parsed by another system round-trip.

/// `DD/MM/YYYY` dates.
pub mod date_format {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::calculation::{DATE_FORMAT, parse_daily_date};

    /// Serializes a date as `DD/MM/YYYY`.
    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(DATE_FORMAT))
    }

    /// Deserializes a `DD/MM/YYYY` or ISO date.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse_daily_date(&text).map_err(serde::de::Error::custom)
    }
}

/// `HH:MM` times of day.
pub mod time_format {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::calculation::{TIME_FORMAT, parse_time};

    /// Serializes a time as `HH:MM`.
    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format(TIME_FORMAT))
    }

    /// Deserializes a strict `HH:MM` time.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse_time(&text)
            .map(|anchored| anchored.time())
            .map_err(serde::de::Error::custom)
    }
}
