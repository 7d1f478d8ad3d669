//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! settings from a YAML file.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{AttendanceError, AttendanceResult};

use super::types::Settings;

/// Loads engine settings.
///
/// # Example
///
/// ```no_run
/// use attendance_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/attendance.yaml").unwrap();
/// println!("Daily records in {}", loader.settings().storage.data_file.display());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    settings: Settings,
}

impl ConfigLoader {
    /// Loads settings from the YAML file at `path`.
    ///
    /// Returns an error if:
    /// - the file cannot be read ([`AttendanceError::ConfigNotFound`])
    /// - the file is not valid YAML for [`Settings`] ([`AttendanceError::ConfigParseError`])
    ///
    /// An empty file yields the default settings.
    pub fn load<P: AsRef<Path>>(path: P) -> AttendanceResult<Self> {
        let settings = Self::load_yaml(path.as_ref())?;
        debug!(?settings, "Loaded settings");
        Ok(Self { settings })
    }

    /// Wraps already-built settings.
    pub fn from_settings(settings: Settings) -> Self {
        Self { settings }
    }

    /// Returns the loaded settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Consumes the loader, returning the settings.
    pub fn into_settings(self) -> Settings {
        self.settings
    }

    fn load_yaml(path: &Path) -> AttendanceResult<Settings> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| AttendanceError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        if content.trim().is_empty() {
            return Ok(Settings::default());
        }

        serde_yaml::from_str(&content).map_err(|e| AttendanceError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }
}
