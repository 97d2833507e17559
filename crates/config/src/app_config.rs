//! Application-level configuration section

use crate::validation::{ConfigSection, ValidationError, Validator};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Log level for application logging
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}

impl FromStr for LogLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            _ => Err(ValidationError::with_value(
                "app.log_level",
                "must be one of: error, warn, info, debug, trace",
                s,
            )),
        }
    }
}

/// Application-level settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    /// Library document (relative to the data dir if not absolute)
    pub library_file: PathBuf,

    /// UI settings document (relative to the data dir if not absolute)
    pub settings_file: PathBuf,

    /// Log level for application output
    pub log_level: LogLevel,
}

impl AppConfig {
    /// Resolves the library document path against a data directory
    pub fn library_path(&self, data_dir: &Path) -> PathBuf {
        resolve(data_dir, &self.library_file)
    }

    /// Resolves the settings document path against a data directory
    pub fn settings_path(&self, data_dir: &Path) -> PathBuf {
        resolve(data_dir, &self.settings_file)
    }
}

fn resolve(base: &Path, file: &Path) -> PathBuf {
    if file.is_absolute() {
        file.to_path_buf()
    } else {
        base.join(file)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            library_file: PathBuf::from("library.json"),
            settings_file: PathBuf::from("settings.json"),
            log_level: LogLevel::Warn,
        }
    }
}

impl ConfigSection for AppConfig {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut results = Vec::new();

        if self.library_file.as_os_str().is_empty() {
            results.push(Err(ValidationError::new(
                "app.library_file",
                "must not be empty",
            )));
        }

        if self.settings_file.as_os_str().is_empty() {
            results.push(Err(ValidationError::new(
                "app.settings_file",
                "must not be empty",
            )));
        }

        if !self.library_file.as_os_str().is_empty() && self.library_file == self.settings_file {
            results.push(Err(ValidationError::with_value(
                "app.settings_file",
                "must differ from app.library_file",
                self.settings_file.display(),
            )));
        }

        Validator::collect_errors(results)
    }

    fn merge(&mut self, other: Self) {
        self.library_file = other.library_file;
        self.settings_file = other.settings_file;
        self.log_level = other.log_level;
    }

    fn section_name(&self) -> &'static str {
        "app"
    }
}
