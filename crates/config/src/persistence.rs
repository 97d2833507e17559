//! File system persistence for configuration
//!
//! This module handles reading and writing config files with:
//! - Atomic writes (no partial/corrupted files)
//! - Automatic backups before overwrites
//! - Directory creation
//!
//! [`write_atomic`] and [`backup_existing`] are shared with the settings and
//! library stores.

use crate::{Config, ConfigError, ConfigResult, ValidationError};
use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Writes `contents` to `path` through a temp file in the same directory
///
/// Missing parent directories are created. The target is replaced by rename,
/// so readers see either the old or the new document.
pub fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    if !dir.exists() {
        fs::create_dir_all(&dir)?;
        log::info!("Created directory: {}", dir.display());
    }

    let mut temp_file = NamedTempFile::new_in(&dir)?;
    temp_file.write_all(contents)?;
    temp_file.flush()?;
    temp_file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Copies an existing file to `<name>.backup`
///
/// Returns the backup path, or `None` when there was nothing to back up.
pub fn backup_existing(path: &Path) -> io::Result<Option<PathBuf>> {
    if !path.is_file() {
        return Ok(None);
    }

    let backup_path = backup_path_for(path);
    fs::copy(path, &backup_path)?;
    log::debug!("Backed up {} to {}", path.display(), backup_path.display());
    Ok(Some(backup_path))
}

fn backup_path_for(path: &Path) -> PathBuf {
    let mut name: OsString = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".backup");
    path.with_file_name(name)
}

const DEFAULT_HEADER: &str = "\
# Libris configuration
#
# [app]   library_file / settings_file are resolved against the data
#         directory unless absolute. log_level: error|warn|info|debug|trace
# [scan]  max_depth = 0 walks the whole tree
#
# LIBRIS_LIBRARY_FILE, LIBRIS_SETTINGS_FILE and LIBRIS_LOG_LEVEL override
# the matching [app] keys.

";

/// Handles configuration file persistence
pub struct ConfigPersistence {
    config_path: PathBuf,
}

impl ConfigPersistence {
    /// Creates a new persistence handler for the given config file path
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Loads configuration from file
    ///
    /// If the file doesn't exist, returns the default config.
    /// If the file is empty or corrupted, returns an error.
    pub fn load(&self) -> ConfigResult<Config> {
        if !self.config_path.exists() {
            log::info!(
                "Config file not found at {}, using defaults",
                self.config_path.display()
            );
            return Ok(Config::default());
        }

        let contents =
            fs::read_to_string(&self.config_path).map_err(|e| ConfigError::ReadError {
                path: self.config_path.clone(),
                source: e,
            })?;

        // Empty files are treated as corrupted, not as valid defaults
        if contents.trim().is_empty() {
            return Err(ConfigError::ReadError {
                path: self.config_path.clone(),
                source: io::Error::new(
                    io::ErrorKind::InvalidData,
                    "Config file is empty or contains only whitespace",
                ),
            });
        }

        let config: Config = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: self.config_path.clone(),
            source: e,
        })?;

        // Don't fail on validation errors, just warn
        if let Err(errors) = config.validate() {
            log::warn!(
                "Config validation warnings: {}",
                ValidationError::join(&errors)
            );
        }

        Ok(config)
    }

    /// Saves configuration to file atomically
    pub fn save(&self, config: &Config) -> ConfigResult<()> {
        if let Err(errors) = config.validate() {
            return Err(ConfigError::ValidationError(ValidationError::join(&errors)));
        }

        if let Some(parent) = self.config_path.parent() {
            self.ensure_directory_exists(parent)?;
        }

        backup_existing(&self.config_path).map_err(|e| ConfigError::BackupError { source: e })?;

        let toml_string = toml::to_string_pretty(config).map_err(ConfigError::SerializeError)?;

        write_atomic(&self.config_path, toml_string.as_bytes()).map_err(|e| {
            ConfigError::WriteError {
                path: self.config_path.clone(),
                source: e,
            }
        })?;

        log::info!("Config saved to {}", self.config_path.display());
        Ok(())
    }

    /// Writes the default config preceded by a short explanatory header
    pub fn write_default_template(&self) -> ConfigResult<()> {
        let body = toml::to_string_pretty(&Config::default())?;
        let document = format!("{}{}", DEFAULT_HEADER, body);

        write_atomic(&self.config_path, document.as_bytes()).map_err(|e| {
            ConfigError::WriteError {
                path: self.config_path.clone(),
                source: e,
            }
        })?;

        log::info!("Generated default config at {}", self.config_path.display());
        Ok(())
    }

    /// Ensures a directory exists, creating it if necessary
    fn ensure_directory_exists(&self, path: &Path) -> ConfigResult<()> {
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path).map_err(|e| ConfigError::DirectoryCreationError {
                path: path.to_path_buf(),
                source: e,
            })?;
            log::info!("Created config directory: {}", path.display());
        }
        Ok(())
    }
}
