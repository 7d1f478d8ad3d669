//! Integration tests for the attendance engine.
//!
//! This test suite drives the HTTP surface end to end:
//! - Stateless calculation (same-day, cross-midnight, fractional shifts)
//! - Break representations
//! - Storing, listing and filtering daily records
//! - Daily, weekly and monthly summaries
//! - Report generation
//! - Error cases and status mapping

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::path::PathBuf;
use std::str::FromStr;
use tower::ServiceExt;
use uuid::Uuid;

use attendance_engine::api::{AppState, create_router};
use attendance_engine::config::Settings;

// =============================================================================
// Test Helpers
// =============================================================================

/// A router over fresh temp files, plus the paths to clean up.
struct TestApp {
    router: Router,
    data_file: PathBuf,
    report_file: PathBuf,
}

impl TestApp {
    fn new() -> Self {
        let id = Uuid::new_v4();
        let dir = std::env::temp_dir();
        let mut settings = Settings::default();
        settings.storage.data_file = dir.join(format!("attendance-it-{id}.csv"));
        settings.storage.report_file = dir.join(format!("attendance-it-{id}.json"));

        let data_file = settings.storage.data_file.clone();
        let report_file = settings.storage.report_file.clone();
        Self {
            router: create_router(AppState::new(settings)),
            data_file,
            report_file,
        }
    }

    async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body_bytes).unwrap();

        (status, json)
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        std::fs::remove_file(&self.data_file).ok();
        std::fs::remove_file(&self.report_file).ok();
    }
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn create_row(
    date: &str,
    employee_id: &str,
    name: &str,
    clock_in: &str,
    clock_out: &str,
    breaks: Value,
    ot_hours: Value,
) -> Value {
    json!({
        "date": date,
        "employee_id": employee_id,
        "name": name,
        "clock_in": clock_in,
        "clock_out": clock_out,
        "breaks": breaks,
        "ot_hours": ot_hours,
    })
}

fn rows(rows: Vec<Value>) -> Value {
    json!({ "rows": rows })
}

fn assert_hours(value: &Value, expected: &str) {
    let actual = value
        .as_str()
        .unwrap_or_else(|| panic!("expected decimal string, got {value}"));
    assert_eq!(decimal(actual), decimal(expected));
}

// =============================================================================
// Calculation
// =============================================================================

#[tokio::test]
async fn test_cross_midnight_shift() {
    let app = TestApp::new();
    let body = rows(vec![create_row("01/07/2024", "E001", "Alice", "19:00", "04:00", json!(1), json!(0))]);

    let (status, result) = app.post("/calculate", body).await;

    assert_eq!(status, StatusCode::OK);
    let record = &result["records"][0];
    assert_hours(&record["work_hours"], "8.0");
    assert_eq!(record["date"], "01/07/2024");
    assert_eq!(record["clock_in"], "19:00");
    assert_eq!(record["clock_out"], "04:00");
}

#[tokio::test]
async fn test_same_day_shift_with_overtime() {
    let app = TestApp::new();
    let body = rows(vec![create_row("02/07/2024", "E001", "Alice", "08:00", "17:00", json!(1), json!(2))]);

    let (status, result) = app.post("/calculate", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_hours(&result["records"][0]["work_hours"], "10.0");
    assert_hours(&result["records"][0]["ot_hours"], "2");
}

#[tokio::test]
async fn test_fractional_shift() {
    let app = TestApp::new();
    let body = rows(vec![create_row("03/07/2024", "E001", "Alice", "08:30", "18:00", json!(1), json!(0))]);

    let (status, result) = app.post("/calculate", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_hours(&result["records"][0]["work_hours"], "8.5");
}

#[tokio::test]
async fn test_break_representations_agree() {
    let app = TestApp::new();
    let variants = [json!(1), json!("1"), json!("0.5,0.5"), json!("0.25; 0.75"), json!("[0.5, 0.5]"), json!([0.5, "0.5"])];

    for breaks in variants {
        let body = rows(vec![create_row("01/07/2024", "E001", "Alice", "08:00", "17:00", breaks.clone(), json!(0))]);
        let (status, result) = app.post("/calculate", body).await;
        assert_eq!(status, StatusCode::OK, "breaks {breaks} rejected: {result}");
        assert_hours(&result["records"][0]["break_total"], "1");
        assert_hours(&result["records"][0]["work_hours"], "8");
    }
}

#[tokio::test]
async fn test_null_breaks_are_zero() {
    let app = TestApp::new();
    let body = rows(vec![create_row("01/07/2024", "E001", "Alice", "09:00", "17:00", Value::Null, json!(0))]);

    let (status, result) = app.post("/calculate", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_hours(&result["records"][0]["break_total"], "0");
    assert_hours(&result["records"][0]["work_hours"], "8");
}

#[tokio::test]
async fn test_records_sorted_by_date_then_employee() {
    let app = TestApp::new();
    let body = rows(vec![
        create_row("02/07/2024", "E002", "Bob", "08:00", "16:00", json!(0), json!(0)),
        create_row("01/07/2024", "E002", "Bob", "08:00", "16:00", json!(0), json!(0)),
        create_row("01/07/2024", "E001", "Alice", "08:00", "16:00", json!(0), json!(0)),
    ]);

    let (_, result) = app.post("/calculate", body).await;

    let keys: Vec<(String, String)> = result["records"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| {
            (
                r["date"].as_str().unwrap().to_string(),
                r["employee_id"].as_str().unwrap().to_string(),
            )
        })
        .collect();
    assert_eq!(
        keys,
        vec![
            ("01/07/2024".to_string(), "E001".to_string()),
            ("01/07/2024".to_string(), "E002".to_string()),
            ("02/07/2024".to_string(), "E002".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_empty_batch_returns_empty_records() {
    let app = TestApp::new();

    let (status, result) = app.post("/calculate", rows(Vec::new())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["records"], json!([]));
}

// =============================================================================
// Validation Errors
// =============================================================================

#[tokio::test]
async fn test_invalid_time_rejects_batch() {
    let app = TestApp::new();
    let body = rows(vec![
        create_row("01/07/2024", "E001", "Alice", "08:00", "17:00", json!(1), json!(0)),
        create_row("01/07/2024", "E002", "Bob", "25:00", "17:00", json!(1), json!(0)),
    ]);

    let (status, result) = app.post("/records", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "VALIDATION_ERROR");
    assert!(result["message"].as_str().unwrap().contains("25:00"));

    // Nothing from the failed batch was stored
    let (_, stored) = app.get("/records").await;
    assert_eq!(stored["records"], json!([]));
}

#[tokio::test]
async fn test_invalid_date_rejected() {
    let app = TestApp::new();
    let body = rows(vec![create_row("32/01/2024", "E001", "Alice", "08:00", "17:00", json!(1), json!(0))]);

    let (status, result) = app.post("/calculate", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(result["message"].as_str().unwrap().contains("32/01/2024"));
}

#[tokio::test]
async fn test_null_overtime_rejected() {
    let app = TestApp::new();
    let body = rows(vec![create_row("01/07/2024", "E001", "Alice", "09:00", "17:00", json!(0), Value::Null)]);

    let (status, result) = app.post("/calculate", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(result["message"].as_str().unwrap().contains("ot_hours"));
}

#[tokio::test]
async fn test_negative_break_rejected() {
    let app = TestApp::new();
    let body = rows(vec![create_row("01/07/2024", "E001", "Alice", "08:00", "17:00", json!("0.5,-1"), json!(0))]);

    let (status, result) = app.post("/calculate", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_unsupported_break_shape_rejected() {
    let app = TestApp::new();
    let body = rows(vec![create_row("01/07/2024", "E001", "Alice", "08:00", "17:00", json!({"lunch": 1}), json!(0))]);

    let (status, result) = app.post("/calculate", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(result["message"].as_str().unwrap().starts_with("Unsupported break representation"));
}

#[tokio::test]
async fn test_net_hours_over_cap_rejected() {
    let app = TestApp::new();
    let body = rows(vec![create_row("01/07/2024", "E001", "Alice", "06:00", "22:00", json!(0), json!(1))]);

    let (status, result) = app.post("/calculate", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(result["message"].as_str().unwrap().contains("16"));
}

#[tokio::test]
async fn test_huge_overtime_rejected_and_not_stored() {
    let app = TestApp::new();
    let body = rows(vec![create_row(
        "01/07/2024",
        "E001",
        "Alice",
        "08:00",
        "17:00",
        json!(1),
        json!("79228162514264337593543950335"),
    )]);

    let (status, result) = app.post("/records", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "VALIDATION_ERROR");

    let (status, result) = app.get("/summary/weekly").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["rows"], json!([]));
}

#[tokio::test]
async fn test_offsetting_huge_breaks_and_overtime_rejected() {
    let app = TestApp::new();
    let row = create_row(
        "01/07/2024",
        "E001",
        "Alice",
        "08:00",
        "17:00",
        json!("70000000000000000000000000000"),
        json!("70000000000000000000000000000"),
    );

    let (status, result) = app.post("/records", rows(vec![row.clone(), row])).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(result["message"].as_str().unwrap().contains("out of range"));
}

#[tokio::test]
async fn test_missing_columns_reported_together() {
    let app = TestApp::new();
    let body = rows(vec![json!({"date": "01/07/2024", "employee_id": "E001", "name": "Alice"})]);

    let (status, result) = app.post("/calculate", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        result["message"],
        "Missing required columns: breaks, clock_in, clock_out, ot_hours"
    );
}

#[tokio::test]
async fn test_malformed_json_returns_400() {
    let app = TestApp::new();

    let (status, result) = app
        .send(
            Request::builder()
                .method("POST")
                .uri("/calculate")
                .header("Content-Type", "application/json")
                .body(Body::from("{\"rows\": ["))
                .unwrap(),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "MALFORMED_JSON");
}

// =============================================================================
// Stored Records
// =============================================================================

#[tokio::test]
async fn test_append_accumulates_records() {
    let app = TestApp::new();

    let (status, first) = app
        .post("/records", rows(vec![create_row("02/07/2024", "E001", "Alice", "08:00", "17:00", json!(1), json!(0))]))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["records"].as_array().unwrap().len(), 1);

    let (status, second) = app
        .post("/records", rows(vec![create_row("01/07/2024", "E002", "Bob", "09:00", "17:00", json!(0.5), json!(0))]))
        .await;
    assert_eq!(status, StatusCode::OK);

    // Existing rows first, no re-sort
    let records = second["records"].as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["employee_id"], "E001");
    assert_eq!(records[1]["employee_id"], "E002");
}

#[tokio::test]
async fn test_list_records_filters() {
    let app = TestApp::new();
    app.post(
        "/records",
        rows(vec![
            create_row("01/07/2024", "E001", "Alice", "08:00", "16:00", json!(0), json!(0)),
            create_row("02/07/2024", "E001", "Alice", "08:00", "16:00", json!(0), json!(0)),
            create_row("03/07/2024", "E001", "Alice", "08:00", "16:00", json!(0), json!(0)),
            create_row("02/07/2024", "E002", "Bob", "08:00", "16:00", json!(0), json!(0)),
        ]),
    )
    .await;

    let (status, result) = app.get("/records?employee_id=E001").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["records"].as_array().unwrap().len(), 3);

    let (_, result) = app.get("/records?from=02/07/2024&to=02/07/2024").await;
    assert_eq!(result["records"].as_array().unwrap().len(), 2);

    let (_, result) = app.get("/records?employee_id=E001&from=02/07/2024").await;
    assert_eq!(result["records"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_list_records_empty_store() {
    let app = TestApp::new();

    let (status, result) = app.get("/records").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["records"], json!([]));
}

#[tokio::test]
async fn test_list_records_bad_filter_date() {
    let app = TestApp::new();

    let (status, result) = app.get("/records?from=1/7/2024").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "VALIDATION_ERROR");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_writes_and_reads_stay_consistent() {
    let app = std::sync::Arc::new(TestApp::new());
    let mut tasks = Vec::new();

    for i in 0..8u32 {
        let writer = app.clone();
        tasks.push(tokio::spawn(async move {
            let day = format!("{:02}/07/2024", i + 1);
            let body = rows(vec![create_row(&day, "E001", "Alice", "08:00", "17:00", json!(1), json!(0))]);
            writer.post("/records", body).await.0
        }));
        let reader = app.clone();
        tasks.push(tokio::spawn(async move { reader.get("/records").await.0 }));
    }

    for task in tasks {
        assert_eq!(task.await.unwrap(), StatusCode::OK);
    }

    let (status, result) = app.get("/records").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["records"].as_array().unwrap().len(), 8);
}

#[tokio::test]
async fn test_corrupt_store_is_io_error() {
    let app = TestApp::new();
    std::fs::write(
        &app.data_file,
        "date,employee_id,name,shift_label,clock_in,clock_out,break_total,ot_hours,work_hours\n\
         not-a-date,E001,Alice,,08:00,17:00,1,0,8\n",
    )
    .unwrap();

    let (status, result) = app.get("/records").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(result["code"], "IO_ERROR");
}

// =============================================================================
// Summaries
// =============================================================================

#[tokio::test]
async fn test_weekly_summary_two_days() {
    let app = TestApp::new();
    app.post(
        "/records",
        rows(vec![
            create_row("01/07/2024", "E001", "Alice", "08:00", "17:00", json!(1), json!(2)),
            create_row("03/07/2024", "E001", "Alice", "19:00", "04:00", json!(1), json!(0)),
        ]),
    )
    .await;

    let (status, result) = app.get("/summary/weekly").await;

    assert_eq!(status, StatusCode::OK);
    let week = &result["rows"][0];
    assert_eq!(week["week_start"], "01/07/2024");
    assert_eq!(week["week_end"], "07/07/2024");
    assert_hours(&week["work_hours_total"], "18");
    assert_hours(&week["ot_total"], "2");
    assert_eq!(week["days_present"], 2);
}

#[tokio::test]
async fn test_monthly_summary_per_employee() {
    let app = TestApp::new();
    app.post(
        "/records",
        rows(vec![
            create_row("30/06/2024", "E001", "Alice", "08:00", "16:00", json!(0), json!(0)),
            create_row("01/07/2024", "E001", "Alice", "08:00", "16:00", json!(0), json!(0)),
            create_row("01/07/2024", "E002", "Bob", "08:00", "12:00", json!(0), json!(0)),
        ]),
    )
    .await;

    let (status, result) = app.get("/summary/monthly").await;

    assert_eq!(status, StatusCode::OK);
    let months: Vec<(String, String)> = result["rows"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| {
            (
                m["month"].as_str().unwrap().to_string(),
                m["employee_id"].as_str().unwrap().to_string(),
            )
        })
        .collect();
    assert_eq!(
        months,
        vec![
            ("2024-06".to_string(), "E001".to_string()),
            ("2024-07".to_string(), "E001".to_string()),
            ("2024-07".to_string(), "E002".to_string()),
        ]
    );
    assert_hours(&result["rows"][2]["work_hours_total"], "4");
}

#[tokio::test]
async fn test_daily_summary_sorted() {
    let app = TestApp::new();
    app.post(
        "/records",
        rows(vec![
            create_row("02/07/2024", "E001", "Alice", "08:00", "16:00", json!(0), json!(0)),
            create_row("01/07/2024", "E001", "Alice", "08:00", "16:00", json!(0), json!(0)),
        ]),
    )
    .await;

    let (status, result) = app.get("/summary/daily").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["rows"][0]["date"], "01/07/2024");
    assert_eq!(result["rows"][1]["date"], "02/07/2024");
}

#[tokio::test]
async fn test_empty_summaries_keep_columns() {
    let app = TestApp::new();

    for (uri, first_column) in [
        ("/summary/daily", "date"),
        ("/summary/weekly", "week_start"),
        ("/summary/monthly", "month"),
    ] {
        let (status, result) = app.get(uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(result["rows"], json!([]));
        assert_eq!(result["columns"][0], first_column);
    }
}

// =============================================================================
// Report
// =============================================================================

#[tokio::test]
async fn test_report_written() {
    let app = TestApp::new();
    app.post(
        "/records",
        rows(vec![
            create_row("01/07/2024", "E001", "Alice", "08:00", "17:00", json!(1), json!(0)),
            create_row("08/07/2024", "E001", "Alice", "08:00", "17:00", json!(1), json!(0)),
        ]),
    )
    .await;

    let (status, result) = app.post("/report", json!({})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["daily"], 2);
    assert_eq!(result["weekly"], 2);
    assert_eq!(result["monthly"], 1);

    let written: Value =
        serde_json::from_str(&std::fs::read_to_string(&app.report_file).unwrap()).unwrap();
    assert_eq!(written["weekly"][1]["week_start"], "08/07/2024");
}
