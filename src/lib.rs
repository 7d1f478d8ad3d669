//! Attendance work-hour engine
//!
//! This crate normalizes raw clock-in/clock-out attendance rows into daily
//! work-hour records (handling shifts that cross midnight, flexible break
//! representations and overtime), persists them, and builds daily, weekly and
//! monthly per-employee summaries. The [`api`] module serves the pipeline over
//! HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod storage;
