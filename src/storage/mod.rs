//! File persistence for daily records, raw imports and reports.
//!
//! Daily records live in a CSV file in the canonical daily schema. Raw
//! attendance rows can be imported from CSV, and the summaries can be written
//! out as a JSON report with one section per summary.

mod daily_store;
mod import;
mod report;

pub use daily_store::{DailyStore, export_records};
pub use import::import_raw_csv;
pub use report::{Report, build_report, write_report};

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use serde::Serialize;
use uuid::Uuid;

use crate::error::{AttendanceError, AttendanceResult};
use crate::models::{RawRow, Tabular};

/// Writes `rows` to `path` as CSV, header first.
///
/// The header is written even when there are no rows.
fn write_csv<T: Serialize + Tabular>(path: &Path, rows: &[T]) -> AttendanceResult<()> {
    write_atomic(path, |file| {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer.write_record(T::COLUMNS).map_err(|e| e.to_string())?;
        for row in rows {
            writer.serialize(row).map_err(|e| e.to_string())?;
        }
        writer.flush().map_err(|e| e.to_string())
    })
}

/// Replaces `path` with whatever `fill` writes.
///
/// The content goes to a hidden sibling file that is renamed over `path`
/// once synced, so `path` only ever holds a complete old or new version.
/// The sibling is removed when anything fails.
fn write_atomic(
    path: &Path,
    fill: impl FnOnce(&mut File) -> Result<(), String>,
) -> AttendanceResult<()> {
    let write_failed = |message: String| AttendanceError::WriteFailed {
        path: path.display().to_string(),
        message,
    };

    let temp = temp_sibling(path).ok_or_else(|| write_failed("not a file path".to_string()))?;
    let result = File::create(&temp)
        .map_err(|e| e.to_string())
        .and_then(|mut file| {
            fill(&mut file)?;
            file.sync_all().map_err(|e| e.to_string())
        })
        .and_then(|()| fs::rename(&temp, path).map_err(|e| e.to_string()));

    if result.is_err() {
        let _ = fs::remove_file(&temp);
    }
    result.map_err(write_failed)
}

fn temp_sibling(path: &Path) -> Option<PathBuf> {
    let file_name = path.file_name()?.to_string_lossy();
    Some(path.with_file_name(format!(".{file_name}.{}.tmp", Uuid::new_v4().simple())))
}

/// Reads a headed CSV file into rows keyed by header name. Every cell is
/// kept as text.
fn read_csv(path: &Path) -> AttendanceResult<Vec<RawRow>> {
    let read_failed = |message: String| AttendanceError::ReadFailed {
        path: path.display().to_string(),
        message,
    };

    let mut reader = csv::Reader::from_path(path).map_err(|e| read_failed(e.to_string()))?;
    let headers = reader
        .headers()
        .map_err(|e| read_failed(e.to_string()))?
        .clone();

    reader
        .records()
        .map(|record| {
            let record = record.map_err(|e| read_failed(e.to_string()))?;
            let mut row = RawRow::new();
            for (column, cell) in headers.iter().zip(record.iter()) {
                row.insert(column.trim(), cell);
            }
            Ok(row)
        })
        .collect()
}
