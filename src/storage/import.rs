//! Import of raw attendance rows from CSV.

use std::path::Path;

use tracing::info;

use crate::error::{AttendanceError, AttendanceResult};
use crate::models::RawRow;

use super::read_csv;

/// Reads a raw-entry CSV file into [`RawRow`]s ready for
/// [`calc_work_hours`](crate::calculation::calc_work_hours).
///
/// Every cell is kept as text. Columns absent from the header stay absent,
/// so the calculator reports them as missing.
pub fn import_raw_csv(path: impl AsRef<Path>) -> AttendanceResult<Vec<RawRow>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(AttendanceError::ReadFailed {
            path: path.display().to_string(),
            message: "CSV file not found".to_string(),
        });
    }

    let rows = read_csv(path)?;
    info!(path = %path.display(), count = rows.len(), "Imported raw rows");
    Ok(rows)
}
