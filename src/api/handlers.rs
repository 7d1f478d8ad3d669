//! HTTP request handlers for the attendance engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::Response,
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    build_daily_summary, build_monthly_summary, build_weekly_summary, calc_work_hours,
    filter_by_date_range, filter_by_employee,
};
use crate::error::AttendanceResult;
use crate::models::NormalizedRecord;
use crate::storage::write_report;

use super::request::{CalculateRequest, RecordQuery};
use super::response::{
    ApiError, ApiErrorResponse, RecordsResponse, ReportResponse, SummaryResponse, json_response,
};
use super::state::AppState;

type HandlerResult = Result<Response, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/records", post(create_records_handler).get(list_records_handler))
        .route("/summary/daily", get(daily_summary_handler))
        .route("/summary/weekly", get(weekly_summary_handler))
        .route("/summary/monthly", get(monthly_summary_handler))
        .route("/report", post(report_handler))
        .with_state(state)
}

/// Handler for POST /calculate.
///
/// Runs the normalization pipeline over the posted rows without storing
/// anything.
async fn calculate_handler(payload: Result<Json<CalculateRequest>, JsonRejection>) -> HandlerResult {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = parse_payload(correlation_id, payload)?;

    let start_time = Instant::now();
    let records = calculate(correlation_id, &request)?;
    info!(
        correlation_id = %correlation_id,
        rows = request.rows.len(),
        duration_us = start_time.elapsed().as_micros(),
        "Calculation completed successfully"
    );

    Ok(json_response(StatusCode::OK, RecordsResponse { records }))
}

/// Handler for POST /records.
///
/// Calculates the posted rows and appends them to the store. Responds with
/// every stored record.
async fn create_records_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculateRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing record submission");

    let request = parse_payload(correlation_id, payload)?;
    let processed = calculate(correlation_id, &request)?;

    let _guard = state.lock_writes().await;
    let store = state.store().clone();
    let added = processed.len();
    let records = blocking(correlation_id, "Appending records failed", move || {
        store.append(&processed)
    })
    .await?;

    info!(
        correlation_id = %correlation_id,
        added,
        stored = records.len(),
        "Records stored"
    );
    Ok(json_response(StatusCode::OK, RecordsResponse { records }))
}

/// Handler for GET /records.
///
/// Supports `employee_id`, `from` and `to` (inclusive, `DD/MM/YYYY`) filters.
async fn list_records_handler(
    State(state): State<AppState>,
    Query(query): Query<RecordQuery>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let (from, to) = logged(correlation_id, "Invalid record query", || query.date_range())?;

    let mut records = load_records(correlation_id, &state).await?;
    if let Some(employee_id) = query.employee() {
        records = filter_by_employee(&records, employee_id);
    }
    records = filter_by_date_range(&records, from, to);

    info!(correlation_id = %correlation_id, count = records.len(), "Listed records");
    Ok(json_response(StatusCode::OK, RecordsResponse { records }))
}

/// Handler for GET /summary/daily.
async fn daily_summary_handler(State(state): State<AppState>) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let records = load_records(correlation_id, &state).await?;
    let rows = logged(correlation_id, "Daily summary failed", || build_daily_summary(&records))?;
    Ok(json_response(StatusCode::OK, SummaryResponse::new(rows)))
}

/// Handler for GET /summary/weekly.
async fn weekly_summary_handler(State(state): State<AppState>) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let records = load_records(correlation_id, &state).await?;
    let rows = logged(correlation_id, "Weekly summary failed", || build_weekly_summary(&records))?;
    Ok(json_response(StatusCode::OK, SummaryResponse::new(rows)))
}

/// Handler for GET /summary/monthly.
async fn monthly_summary_handler(State(state): State<AppState>) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let records = load_records(correlation_id, &state).await?;
    let rows = logged(correlation_id, "Monthly summary failed", || build_monthly_summary(&records))?;
    Ok(json_response(StatusCode::OK, SummaryResponse::new(rows)))
}

/// Handler for POST /report.
///
/// Writes the summary report for every stored record to the configured
/// report file.
async fn report_handler(State(state): State<AppState>) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Generating report");

    let _guard = state.lock_writes().await;
    let records = load_records(correlation_id, &state).await?;
    let path = state.settings().storage.report_file.clone();
    let target = path.clone();
    let report = blocking(correlation_id, "Writing report failed", move || {
        write_report(target, &records)
    })
    .await?;

    Ok(json_response(
        StatusCode::OK,
        ReportResponse {
            path: path.display().to_string(),
            daily: report.daily.len(),
            weekly: report.weekly.len(),
            monthly: report.monthly.len(),
        },
    ))
}

/// Unwraps a JSON body, turning extractor rejections into 400 responses.
fn parse_payload<T>(
    correlation_id: Uuid,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, ApiErrorResponse> {
    let rejection = match payload {
        Ok(Json(request)) => return Ok(request),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // Get the body text which contains the detailed error from serde
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    Err(ApiErrorResponse::bad_request(error))
}

fn calculate(correlation_id: Uuid, request: &CalculateRequest) -> Result<Vec<NormalizedRecord>, ApiErrorResponse> {
    logged(correlation_id, "Calculation failed", || calc_work_hours(&request.rows))
}

async fn load_records(
    correlation_id: Uuid,
    state: &AppState,
) -> Result<Vec<NormalizedRecord>, ApiErrorResponse> {
    let store = state.store().clone();
    blocking(correlation_id, "Loading stored records failed", move || store.load()).await
}

/// Runs file work on the blocking thread pool, logging failures the same way
/// as [`logged`].
async fn blocking<T: Send + 'static>(
    correlation_id: Uuid,
    context: &'static str,
    operation: impl FnOnce() -> AttendanceResult<T> + Send + 'static,
) -> Result<T, ApiErrorResponse> {
    match tokio::task::spawn_blocking(operation).await {
        Ok(result) => logged(correlation_id, context, || result),
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "{context}");
            Err(ApiErrorResponse::internal(ApiError::internal_error(
                "Storage task did not complete",
            )))
        }
    }
}

/// Runs `operation`, logging any failure against the request before it is
/// mapped to an HTTP error.
fn logged<T>(
    correlation_id: Uuid,
    context: &str,
    operation: impl FnOnce() -> AttendanceResult<T>,
) -> Result<T, ApiErrorResponse> {
    operation().map_err(|err| {
        warn!(
            correlation_id = %correlation_id,
            error = %err,
            kind = ?err.kind(),
            "{context}"
        );
        err.into()
    })
}
