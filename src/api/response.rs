//! Response types for the attendance engine API.
//!
//! This module defines the success bodies, the error response structures and
//! the mapping from [`AttendanceError`] to HTTP status codes.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::{AttendanceError, ErrorKind};
use crate::models::{NormalizedRecord, Tabular};

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates a storage or configuration failure response.
    pub fn io_error(message: impl Into<String>) -> Self {
        Self::with_details(
            "IO_ERROR",
            message,
            "The attendance data could not be read or written",
        )
    }

    /// Creates a response for a failure inside the server itself.
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response carrying `error`.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }

    /// A 500 response carrying `error`.
    pub fn internal(error: ApiError) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        json_response(self.status, self.error)
    }
}

impl From<AttendanceError> for ApiErrorResponse {
    fn from(error: AttendanceError) -> Self {
        match error.kind() {
            ErrorKind::Validation => Self::bad_request(ApiError::validation_error(error.to_string())),
            ErrorKind::Io => Self::internal(ApiError::io_error(error.to_string())),
        }
    }
}

/// Body for endpoints returning daily records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordsResponse {
    /// The daily records.
    pub records: Vec<NormalizedRecord>,
}

/// Body for the summary endpoints: the fixed column set and the rows.
///
/// `columns` is present even when `rows` is empty.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryResponse<T> {
    /// Column names in schema order.
    pub columns: &'static [&'static str],
    /// Summary rows.
    pub rows: Vec<T>,
}

impl<T: Tabular> SummaryResponse<T> {
    /// Wraps `rows` with the columns of `T`.
    pub fn new(rows: Vec<T>) -> Self {
        Self {
            columns: T::COLUMNS,
            rows,
        }
    }
}

/// Body for `POST /report`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportResponse {
    /// Where the report was written.
    pub path: String,
    /// Number of daily rows.
    pub daily: usize,
    /// Number of weekly rows.
    pub weekly: usize,
    /// Number of monthly rows.
    pub monthly: usize,
}

/// A JSON response with an explicit content type.
pub(super) fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}
