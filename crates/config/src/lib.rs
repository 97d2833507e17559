//! Libris Configuration System
//!
//! Two kinds of persisted preferences live here:
//!
//! - **Application config** (`config.toml`): where the data files live, the
//!   log level and directory-scan behaviour. Loaded through [`ConfigManager`].
//! - **UI settings** (`settings.json`): theme, font and color schemes shown by
//!   the front-end. Owned by [`SettingsStore`], updated by deep merge.
//!
//! Both are written atomically (temp file + rename) and the previous file is
//! kept as `<name>.backup`.
//!
//! # Example
//!
//! ```rust,no_run
//! use libris_config::{Config, ConfigManager};
//!
//! let manager = ConfigManager::new().expect("Failed to initialize config");
//! let config = manager.load().unwrap_or_else(|e| {
//!     eprintln!("Config error: {}, using defaults", e);
//!     Config::default()
//! });
//!
//! println!("Library file: {}", config.app.library_file.display());
//! ```

mod error;
mod manager;
mod merge;
mod persistence;
mod settings;
mod validation;

// Config sections
pub mod app_config;
mod scan_config;

pub use error::{ConfigError, ConfigResult, ValidationError};
pub use manager::{ConfigManager, ENV_LIBRARY_FILE, ENV_LOG_LEVEL, ENV_SETTINGS_FILE};
pub use merge::deep_merge;
pub use persistence::{backup_existing, write_atomic};
pub use settings::{FontSettings, SettingsStore, UiSettings};
pub use validation::{ConfigSection, Validator};

// Re-export config sections
pub use app_config::{AppConfig, LogLevel};
pub use scan_config::ScanConfig;

use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Application-level settings
    pub app: AppConfig,

    /// Directory scan behaviour
    pub scan: ScanConfig,
}

impl Config {
    /// Creates a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates the entire configuration
    ///
    /// Returns all validation errors found across all sections.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(mut e) = self.app.validate() {
            errors.append(&mut e);
        }

        if let Err(mut e) = self.scan.validate() {
            errors.append(&mut e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Merges this config with another, preferring values from `other`
    pub fn merge(&mut self, other: Config) {
        self.app.merge(other.app);
        self.scan.merge(other.scan);
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app: AppConfig::default(),
            scan: ScanConfig::default(),
        }
    }
}
