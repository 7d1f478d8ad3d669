//! Calculation logic for the attendance engine.
//!
//! This module contains the normalization pipeline that turns raw attendance
//! rows into daily records (time and date parsing, break flattening, interval
//! resolution across midnight, net hour computation) together with the
//! daily, weekly and monthly summaries and the record filters built on it.

mod aggregation;
mod break_normalization;
mod filters;
mod interval_resolver;
mod time_parsing;
mod work_hours;

pub use aggregation::{
    DailySource, build_daily_summary, build_monthly_summary, build_weekly_summary, week_start,
};
pub use break_normalization::normalize_breaks;
pub use filters::{filter_by_date_range, filter_by_employee, merge_records};
pub use interval_resolver::resolve_interval;
pub use time_parsing::{DATE_FORMAT, TIME_FORMAT, parse_date, parse_daily_date, parse_time};
pub use work_hours::{MAX_ENTRY_HOURS, MAX_NET_HOURS, REQUIRED_COLUMNS, calc_work_hours};
