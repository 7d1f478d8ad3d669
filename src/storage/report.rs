//! The summary report workbook.

use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::calculation::{build_daily_summary, build_monthly_summary, build_weekly_summary};
use crate::error::AttendanceResult;
use crate::models::{MonthlyAggregate, NormalizedRecord, WeeklyAggregate};

use super::write_atomic;

/// Daily, weekly and monthly summaries of one record collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Canonical daily records.
    pub daily: Vec<NormalizedRecord>,
    /// Per-employee weekly totals.
    pub weekly: Vec<WeeklyAggregate>,
    /// Per-employee monthly totals.
    pub monthly: Vec<MonthlyAggregate>,
}

/// Builds all three summaries from `records`.
pub fn build_report(records: &[NormalizedRecord]) -> AttendanceResult<Report> {
    let daily = build_daily_summary(records)?;
    let weekly = build_weekly_summary(&daily)?;
    let monthly = build_monthly_summary(&daily)?;
    Ok(Report {
        daily,
        weekly,
        monthly,
    })
}

/// Builds the report for `records` and writes it to `path` as JSON.
pub fn write_report(path: impl AsRef<Path>, records: &[NormalizedRecord]) -> AttendanceResult<Report> {
    let path = path.as_ref();
    let report = build_report(records)?;

    write_atomic(path, |file| {
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &report).map_err(|e| e.to_string())?;
        writer.flush().map_err(|e| e.to_string())
    })?;

    info!(
        path = %path.display(),
        daily = report.daily.len(),
        weekly = report.weekly.len(),
        monthly = report.monthly.len(),
        "Wrote report"
    );
    Ok(report)
}
