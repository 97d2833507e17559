//! Locating, loading and saving `config.toml`

use crate::persistence::ConfigPersistence;
use crate::{Config, ConfigError, ConfigResult, LogLevel, ValidationError};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Overrides `app.library_file`
pub const ENV_LIBRARY_FILE: &str = "LIBRIS_LIBRARY_FILE";
/// Overrides `app.settings_file`
pub const ENV_SETTINGS_FILE: &str = "LIBRIS_SETTINGS_FILE";
/// Overrides `app.log_level`
pub const ENV_LOG_LEVEL: &str = "LIBRIS_LOG_LEVEL";

const CONFIG_FILE_NAME: &str = "config.toml";

/// Entry point for the application config
///
/// Owns the location of `config.toml` and the platform directories the
/// library and settings documents default to.
pub struct ConfigManager {
    config_dir: PathBuf,
    persistence: ConfigPersistence,
}

impl ConfigManager {
    /// Uses the platform config directory
    ///
    /// - Linux: `~/.config/libris/`
    /// - macOS: `~/Library/Application Support/libris/`
    /// - Windows: `%APPDATA%\libris\config\`
    pub fn new() -> ConfigResult<Self> {
        Self::with_directory(Self::default_config_dir()?)
    }

    /// Uses `config_dir` instead of the platform directory
    pub fn with_directory(config_dir: PathBuf) -> ConfigResult<Self> {
        let persistence = ConfigPersistence::new(config_dir.join(CONFIG_FILE_NAME));
        Ok(Self {
            config_dir,
            persistence,
        })
    }

    fn project_dirs() -> ConfigResult<ProjectDirs> {
        ProjectDirs::from("", "", "libris").ok_or_else(|| ConfigError::PathResolutionError {
            reason: "no home directory for the current user".to_string(),
        })
    }

    pub fn default_config_dir() -> ConfigResult<PathBuf> {
        Ok(Self::project_dirs()?.config_dir().to_path_buf())
    }

    /// Where `library.json` and `settings.json` live unless configured otherwise
    pub fn default_data_dir() -> ConfigResult<PathBuf> {
        Ok(Self::project_dirs()?.data_dir().to_path_buf())
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn config_path(&self) -> PathBuf {
        self.persistence.path().to_path_buf()
    }

    /// Reads `config.toml`; a missing file yields the defaults
    pub fn load(&self) -> ConfigResult<Config> {
        self.persistence.load()
    }

    /// Like [`ConfigManager::load`] but never fails
    pub fn load_or_default(&self) -> Config {
        self.load().unwrap_or_else(|e| {
            log::warn!("Ignoring unreadable config ({}), using defaults", e);
            Config::default()
        })
    }

    /// Validates and writes `config`
    pub fn save(&self, config: &Config) -> ConfigResult<()> {
        self.persistence.save(config)
    }

    /// Read-modify-write of the stored config
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # use libris_config::ConfigManager;
    /// # let manager = ConfigManager::new().unwrap();
    /// manager.update(|config| {
    ///     config.scan.follow_symlinks = true;
    /// }).expect("Failed to update config");
    /// ```
    pub fn update<F>(&self, update_fn: F) -> ConfigResult<()>
    where
        F: FnOnce(&mut Config),
    {
        let mut config = self.load()?;
        update_fn(&mut config);
        self.save(&config)
    }

    /// Writes the commented default file unless one is already there
    ///
    /// Returns whether a file was written.
    pub fn initialize(&self) -> ConfigResult<bool> {
        let path = self.persistence.path();
        if path.exists() {
            log::info!("Keeping existing config at {}", path.display());
            return Ok(false);
        }

        self.persistence.write_default_template()?;
        Ok(true)
    }

    /// Overwrites the stored config with the defaults
    pub fn reset(&self) -> ConfigResult<()> {
        self.save(&Config::default())
    }

    /// Problems found in the stored config; empty when it is valid
    pub fn validate(&self) -> ConfigResult<Vec<ValidationError>> {
        Ok(self.load()?.validate().err().unwrap_or_default())
    }

    /// Loads the config and applies `LIBRIS_*` environment overrides
    ///
    /// Empty variables are ignored. An unparseable log level is an error.
    pub fn load_with_env_overrides(&self) -> ConfigResult<Config> {
        let mut config = self.load()?;
        apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;

        if let Err(errors) = config.validate() {
            log::warn!(
                "Config validation warnings after env overrides: {}",
                ValidationError::join(&errors)
            );
        }

        Ok(config)
    }
}

fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> ConfigResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    if let Some(file) = var(ENV_LIBRARY_FILE) {
        log::debug!("{} override: {}", ENV_LIBRARY_FILE, file);
        config.app.library_file = PathBuf::from(file);
    }

    if let Some(file) = var(ENV_SETTINGS_FILE) {
        log::debug!("{} override: {}", ENV_SETTINGS_FILE, file);
        config.app.settings_file = PathBuf::from(file);
    }

    if let Some(level) = var(ENV_LOG_LEVEL) {
        config.app.log_level = level
            .parse::<LogLevel>()
            .map_err(|e| ConfigError::ValidationError(format!("{}: {}", ENV_LOG_LEVEL, e)))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::TempDir;

    fn manager_in_temp_dir() -> (TempDir, ConfigManager) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let manager = ConfigManager::with_directory(temp_dir.path().to_path_buf())
            .expect("Failed to create manager");
        (temp_dir, manager)
    }

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_paths() {
        let (temp_dir, manager) = manager_in_temp_dir();
        assert_eq!(manager.config_dir(), temp_dir.path());
        assert_eq!(manager.config_path(), temp_dir.path().join("config.toml"));
    }

    #[test]
    fn test_missing_file_means_defaults() {
        let (_temp_dir, manager) = manager_in_temp_dir();
        assert_eq!(manager.load().expect("Should load"), Config::default());
        assert_eq!(manager.load_or_default(), Config::default());
        assert!(!manager.config_path().exists());
    }

    #[test]
    fn test_update_roundtrip() {
        let (_temp_dir, manager) = manager_in_temp_dir();

        manager
            .update(|config| {
                config.app.log_level = LogLevel::Debug;
                config.scan.max_depth = 3;
            })
            .expect("Should update");

        let loaded = manager.load().expect("Should load");
        assert_eq!(loaded.app.log_level, LogLevel::Debug);
        assert_eq!(loaded.scan.max_depth, 3);
    }

    #[test]
    fn test_initialize_only_once() {
        let (_temp_dir, manager) = manager_in_temp_dir();

        assert!(manager.initialize().expect("Should initialize"));
        let written = fs::read_to_string(manager.config_path()).unwrap();

        manager
            .update(|config| config.scan.follow_symlinks = true)
            .unwrap();
        assert!(!manager.initialize().expect("Should initialize"));
        assert_ne!(fs::read_to_string(manager.config_path()).unwrap(), written);
    }

    #[test]
    fn test_reset_after_changes() {
        let (_temp_dir, manager) = manager_in_temp_dir();
        manager
            .update(|config| config.app.library_file = PathBuf::from("books.json"))
            .unwrap();

        manager.reset().expect("Should reset");
        assert_eq!(manager.load().unwrap(), Config::default());
    }

    #[test]
    fn test_invalid_config_not_saved() {
        let (_temp_dir, manager) = manager_in_temp_dir();

        let result = manager.update(|config| config.scan.max_depth = 100_000);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
        assert!(!manager.config_path().exists());
    }

    #[test]
    fn test_validate_reports_hand_edited_problems() {
        let (_temp_dir, manager) = manager_in_temp_dir();
        fs::write(
            manager.config_path(),
            "[app]\nlibrary_file = \"same.json\"\nsettings_file = \"same.json\"\n",
        )
        .unwrap();

        let problems = manager.validate().unwrap();
        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].field, "app.settings_file");
    }

    #[test]
    fn test_env_overrides_applied() {
        let mut config = Config::default();
        apply_env_overrides(
            &mut config,
            env(&[
                (ENV_LIBRARY_FILE, "books.json"),
                (ENV_SETTINGS_FILE, "/tmp/ui.json"),
                (ENV_LOG_LEVEL, "debug"),
            ]),
        )
        .unwrap();

        assert_eq!(config.app.library_file, PathBuf::from("books.json"));
        assert_eq!(config.app.settings_file, PathBuf::from("/tmp/ui.json"));
        assert_eq!(config.app.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_empty_env_values_ignored() {
        let mut config = Config::default();
        apply_env_overrides(&mut config, env(&[(ENV_LIBRARY_FILE, "  ")])).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_bad_log_level_override() {
        let mut config = Config::default();
        let result = apply_env_overrides(&mut config, env(&[(ENV_LOG_LEVEL, "chatty")]));
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }
}
