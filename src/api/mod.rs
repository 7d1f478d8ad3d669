//! HTTP API module for the attendance engine.
//!
//! This module exposes the normalization pipeline, the daily record store and
//! the summaries as REST endpoints.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CalculateRequest, RecordQuery};
pub use response::{ApiError, RecordsResponse, ReportResponse, SummaryResponse};
pub use state::AppState;
