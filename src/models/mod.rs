//! Core data models for the attendance engine.
//!
//! This module contains the input row and break shapes, the work interval,
//! the normalized daily record and the weekly/monthly aggregates.

mod break_input;
pub mod formats;
mod interval;
mod raw_row;
mod record;
mod summary;
mod tabular;

pub use break_input::{BreakInput, BreakItem};
pub use interval::Interval;
pub use raw_row::RawRow;
pub use record::NormalizedRecord;
pub use summary::{Month, MonthlyAggregate, WeeklyAggregate};
pub use tabular::Tabular;

pub(crate) use raw_row::parse_decimal;
