//! Selection and concatenation helpers over daily records.

use chrono::NaiveDate;

use crate::models::NormalizedRecord;

/// Keeps the records of a single employee, preserving input order.
///
/// The id is compared after trimming both sides.
pub fn filter_by_employee(records: &[NormalizedRecord], employee_id: &str) -> Vec<NormalizedRecord> {
    let wanted = employee_id.trim();
    records
        .iter()
        .filter(|record| record.employee_id.trim() == wanted)
        .cloned()
        .collect()
}

/// Keeps records whose date falls within `from..=to`.
///
/// Either bound may be omitted. An inverted range selects nothing.
pub fn filter_by_date_range(
    records: &[NormalizedRecord],
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Vec<NormalizedRecord> {
    records
        .iter()
        .filter(|record| from.is_none_or(|from| record.date >= from))
        .filter(|record| to.is_none_or(|to| record.date <= to))
        .cloned()
        .collect()
}

/// Appends `processed` after `existing`. No re-sorting or de-duplication.
pub fn merge_records(
    existing: &[NormalizedRecord],
    processed: &[NormalizedRecord],
) -> Vec<NormalizedRecord> {
    existing.iter().chain(processed).cloned().collect()
}
