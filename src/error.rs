//! Error types for the attendance engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! Every error belongs to one of two kinds: validation failures (bad or
//! out-of-policy input, reject the record) and I/O failures (persistence,
//! configuration and import problems, which a caller may retry).

use rust_decimal::Decimal;
use thiserror::Error;

/// The broad category of an [`AttendanceError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or out-of-policy input.
    Validation,
    /// Read, write or configuration failure.
    Io,
}

/// The main error type for the attendance engine.
///
/// # Example
///
/// ```
/// use attendance_engine::error::{AttendanceError, ErrorKind};
///
/// let error = AttendanceError::InvalidTime {
///     value: "25:00".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid time format '25:00'. Expected HH:MM");
/// assert_eq!(error.kind(), ErrorKind::Validation);
/// ```
#[derive(Debug, Error)]
pub enum AttendanceError {
    /// A time-of-day did not match `HH:MM`.
    #[error("Invalid time format '{value}'. Expected HH:MM")]
    InvalidTime {
        /// The offending text.
        value: String,
    },

    /// A calendar date did not match `DD/MM/YYYY` or does not exist.
    #[error("Invalid date format '{value}'. Expected DD/MM/YYYY")]
    InvalidDate {
        /// The offending text.
        value: String,
    },

    /// One or more required columns were absent from a batch.
    #[error("Missing required columns: {}", columns.join(", "))]
    MissingColumns {
        /// Every missing column, sorted.
        columns: Vec<String>,
    },

    /// A field held a value of the wrong shape.
    #[error("Field '{field}' {message}")]
    InvalidField {
        /// The field name.
        field: String,
        /// What was wrong with it.
        message: String,
    },

    /// A break duration was below zero.
    #[error("Break duration cannot be negative: {value}")]
    NegativeBreak {
        /// The negative duration.
        value: Decimal,
    },

    /// A break token could not be read as a number.
    #[error("Invalid break value '{value}'")]
    InvalidBreakValue {
        /// The offending token.
        value: String,
    },

    /// The break field had a shape that cannot represent durations.
    #[error("Unsupported break representation: {found}")]
    UnsupportedBreak {
        /// A rendering of the rejected value.
        found: String,
    },

    /// Overtime hours were below zero.
    #[error("Overtime hours cannot be negative: {value}")]
    NegativeOvertime {
        /// The negative overtime figure.
        value: Decimal,
    },

    /// Interval minus breaks plus overtime came out below zero.
    #[error("Net worked hours cannot be negative: {hours}")]
    NegativeNetHours {
        /// The computed net hours.
        hours: Decimal,
    },

    /// Net hours exceeded the daily cap.
    #[error("Net worked hours cannot exceed {limit} hours: {hours}")]
    ExcessiveNetHours {
        /// The computed net hours.
        hours: Decimal,
        /// The cap that was exceeded.
        limit: Decimal,
    },

    /// An hour figure, or a sum of hour figures, exceeded what any shift can hold.
    #[error("Hours for '{field}' out of range (limit {limit})")]
    HoursOutOfRange {
        /// The field or total that overflowed.
        field: String,
        /// The largest accepted value.
        limit: Decimal,
    },

    /// An interval was constructed with its end before its start.
    #[error("Interval end {end} must be on or after start {start}")]
    InvalidInterval {
        /// Rendered start timestamp.
        start: String,
        /// Rendered end timestamp.
        end: String,
    },

    /// A file could not be read.
    #[error("Failed to read '{path}': {message}")]
    ReadFailed {
        /// The file path.
        path: String,
        /// The underlying failure.
        message: String,
    },

    /// A file could not be written.
    #[error("Failed to write '{path}': {message}")]
    WriteFailed {
        /// The file path.
        path: String,
        /// The underlying failure.
        message: String,
    },

    /// Persisted data failed validation while loading.
    #[error("Invalid stored data in '{path}': {message}")]
    StoredDataInvalid {
        /// The data file path.
        path: String,
        /// The validation failure.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

impl AttendanceError {
    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AttendanceError::ReadFailed { .. }
            | AttendanceError::WriteFailed { .. }
            | AttendanceError::StoredDataInvalid { .. }
            | AttendanceError::ConfigNotFound { .. }
            | AttendanceError::ConfigParseError { .. } => ErrorKind::Io,
            _ => ErrorKind::Validation,
        }
    }

    /// True when the error rejects input rather than reporting an I/O failure.
    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }

    pub(crate) fn invalid_field(field: &str, message: impl Into<String>) -> Self {
        AttendanceError::InvalidField {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return AttendanceError.
pub type AttendanceResult<T> = Result<T, AttendanceError>;
