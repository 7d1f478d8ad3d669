//! Request types for the attendance engine API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calculation::parse_date;
use crate::error::AttendanceResult;
use crate::models::RawRow;

/// Request body for `POST /calculate` and `POST /records`.
///
/// Each row is a raw attendance mapping; its values are inspected by the
/// calculator, so a row with a malformed value is reported as a validation
/// error rather than a JSON error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalculateRequest {
    /// The raw attendance rows.
    pub rows: Vec<RawRow>,
}

/// Query parameters for `GET /records`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordQuery {
    /// Keep only this employee.
    pub employee_id: Option<String>,
    /// Earliest date to keep, `DD/MM/YYYY`, inclusive.
    pub from: Option<String>,
    /// Latest date to keep, `DD/MM/YYYY`, inclusive.
    pub to: Option<String>,
}

impl RecordQuery {
    /// Parses the `from` and `to` bounds. Blank values count as absent.
    pub fn date_range(&self) -> AttendanceResult<(Option<NaiveDate>, Option<NaiveDate>)> {
        Ok((parse_bound(self.from.as_deref())?, parse_bound(self.to.as_deref())?))
    }

    /// The employee filter, if one was given.
    pub fn employee(&self) -> Option<&str> {
        self.employee_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}

fn parse_bound(text: Option<&str>) -> AttendanceResult<Option<NaiveDate>> {
    match text.map(str::trim) {
        Some(text) if !text.is_empty() => parse_date(text).map(Some),
        _ => Ok(None),
    }
}
