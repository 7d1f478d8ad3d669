//! Configuration loading and management for the attendance engine.
//!
//! This module loads the engine settings (storage file locations and the
//! HTTP listening address) from a YAML file.
//!
//! # Example
//!
//! ```no_run
//! use attendance_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/attendance.yaml").unwrap();
//! println!("Listening on {}", config.settings().server.bind_address());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{ServerSettings, Settings, StorageSettings};
