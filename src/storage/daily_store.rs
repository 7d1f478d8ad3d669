//! The CSV-backed daily record store.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::calculation::{DailySource, merge_records};
use crate::error::{AttendanceError, AttendanceResult};
use crate::models::{NormalizedRecord, RawRow};

use super::{read_csv, write_csv};

/// Numeric columns that may be left blank in a stored file; blank reads as zero.
const ZERO_WHEN_BLANK: [&str; 3] = ["break_total", "ot_hours", "work_hours"];

/// Persists [`NormalizedRecord`]s to a single CSV file.
///
/// Rows are kept in the order they were appended.
///
/// # Example
///
/// ```no_run
/// use attendance_engine::storage::DailyStore;
///
/// let store = DailyStore::new("attendance_daily.csv");
/// let records = store.load()?;
/// println!("{} stored records", records.len());
/// # Ok::<(), attendance_engine::error::AttendanceError>(())
/// ```
#[derive(Debug, Clone)]
pub struct DailyStore {
    path: PathBuf,
}

impl DailyStore {
    /// Creates a store over the CSV file at `path`. The file need not exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads every stored record. A missing file is an empty store.
    pub fn load(&self) -> AttendanceResult<Vec<NormalizedRecord>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "No stored records yet");
            return Ok(Vec::new());
        }

        let rows = read_csv(&self.path)?;
        let records = rows
            .iter()
            .enumerate()
            .map(|(index, row)| self.reshape(index, row))
            .collect::<AttendanceResult<Vec<_>>>()?;

        debug!(path = %self.path.display(), count = records.len(), "Loaded stored records");
        Ok(records)
    }

    /// Replaces the file contents with `records`.
    pub fn save(&self, records: &[NormalizedRecord]) -> AttendanceResult<()> {
        write_csv(&self.path, records)?;
        info!(path = %self.path.display(), count = records.len(), "Saved daily records");
        Ok(())
    }

    /// Appends `processed` after the stored records and saves the result.
    ///
    /// Returns the combined collection.
    pub fn append(&self, processed: &[NormalizedRecord]) -> AttendanceResult<Vec<NormalizedRecord>> {
        let existing = self.load()?;
        let combined = merge_records(&existing, processed);
        self.save(&combined)?;
        Ok(combined)
    }

    fn reshape(&self, index: usize, row: &RawRow) -> AttendanceResult<NormalizedRecord> {
        let mut row = row.clone();
        for column in ZERO_WHEN_BLANK {
            let blank = row
                .get(column)
                .and_then(|value| value.as_str())
                .is_some_and(|text| text.trim().is_empty());
            if blank {
                row.insert(column, "0");
            }
        }

        row.to_daily().map_err(|e| AttendanceError::StoredDataInvalid {
            path: self.path.display().to_string(),
            message: format!("row {}: {e}", index + 1),
        })
    }
}

/// Writes `records` to `path` in the daily schema.
pub fn export_records(path: impl AsRef<Path>, records: &[NormalizedRecord]) -> AttendanceResult<()> {
    let path = path.as_ref();
    write_csv(path, records)?;
    info!(path = %path.display(), count = records.len(), "Exported daily records");
    Ok(())
}
