//! Configuration types for the attendance engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML settings file. Every key is optional and
//! falls back to the default shown on its field.

use serde::Deserialize;
use std::path::PathBuf;

/// Top-level settings file structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where daily records and reports are persisted.
    pub storage: StorageSettings,
    /// Where the HTTP service listens.
    pub server: ServerSettings,
}

/// File locations used by the storage layer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// The daily-records CSV file (default `attendance_daily.csv`).
    pub data_file: PathBuf,
    /// The JSON report workbook (default `attendance_report.json`).
    pub report_file: PathBuf,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("attendance_daily.csv"),
            report_file: PathBuf::from("attendance_report.json"),
        }
    }
}

/// Listening address of the HTTP service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Host or IP to bind (default `127.0.0.1`).
    pub host: String,
    /// TCP port to bind (default `8080`).
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl ServerSettings {
    /// The `host:port` pair to bind.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
