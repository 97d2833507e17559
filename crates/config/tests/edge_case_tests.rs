//! Edge case and error scenario tests

use libris_config::{
    Config, ConfigError, ConfigManager, SettingsStore, UiSettings, ENV_LOG_LEVEL,
};
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn setup_test_manager() -> Result<(TempDir, ConfigManager), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let manager = ConfigManager::with_directory(temp_dir.path().to_path_buf())?;
    Ok((temp_dir, manager))
}

#[test]
fn test_corrupted_config_uses_defaults() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp_dir, manager) = setup_test_manager()?;
    fs::write(manager.config_path(), "this is not valid TOML {{{")?;

    assert!(manager.load().is_err());
    assert_eq!(manager.load_or_default(), Config::default());
    Ok(())
}

#[test]
fn test_save_creates_parent_directories() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let nested_path = temp_dir.path().join("a").join("b").join("c");
    let manager = ConfigManager::with_directory(nested_path)?;

    manager.save(&Config::default())?;
    assert!(manager.config_path().exists());
    Ok(())
}

#[test]
fn test_partial_config_fills_defaults() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp_dir, manager) = setup_test_manager()?;
    fs::write(manager.config_path(), "[scan]\nmax_depth = 4\n")?;

    let config = manager.load()?;
    assert_eq!(config.scan.max_depth, 4);
    assert!(!config.scan.follow_symlinks);
    assert_eq!(config.app, Config::default().app);
    Ok(())
}

#[test]
fn test_concurrent_config_loads() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let config_dir = temp_dir.path().to_path_buf();
    ConfigManager::with_directory(config_dir.clone())?.initialize()?;

    let handles: Vec<_> = (0..2)
        .map(|_| {
            let dir = config_dir.clone();
            std::thread::spawn(move || {
                let mgr = ConfigManager::with_directory(dir).expect("manager");
                for _ in 0..10 {
                    assert_eq!(mgr.load().expect("load"), Config::default());
                }
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().is_ok());
    }
    Ok(())
}

#[test]
fn test_special_characters_in_paths() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp_dir, manager) = setup_test_manager()?;

    let mut config = Config::default();
    config.app.library_file = PathBuf::from("my books/библиотека.json");
    manager.save(&config)?;

    assert_eq!(manager.load()?.app.library_file, config.app.library_file);
    Ok(())
}

#[test]
#[cfg(unix)]
fn test_readonly_config_dir() -> Result<(), Box<dyn std::error::Error>> {
    use std::os::unix::fs::PermissionsExt;

    let (temp_dir, manager) = setup_test_manager()?;
    manager.initialize()?;

    let mut perms = fs::metadata(temp_dir.path())?.permissions();
    perms.set_mode(0o555);
    fs::set_permissions(temp_dir.path(), perms.clone())?;

    // root ignores directory permissions
    let writable = tempfile::NamedTempFile::new_in(temp_dir.path()).is_ok();
    if !writable {
        assert!(manager.save(&Config::default()).is_err());
    }
    assert!(manager.load().is_ok());

    perms.set_mode(0o755);
    fs::set_permissions(temp_dir.path(), perms)?;
    Ok(())
}

#[test]
fn test_rapid_saves() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp_dir, manager) = setup_test_manager()?;
    let mut config = Config::default();

    for depth in 0..50 {
        config.scan.max_depth = depth;
        manager.save(&config)?;
    }

    assert_eq!(manager.load()?.scan.max_depth, 49);
    Ok(())
}

#[test]
fn test_env_log_level_constant_name() {
    assert_eq!(ENV_LOG_LEVEL, "LIBRIS_LOG_LEVEL");
}

#[test]
fn test_settings_file_with_array_root() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("settings.json");
    fs::write(&path, "[1, 2, 3]")?;

    let result = SettingsStore::open(&path);
    assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    Ok(())
}

#[test]
fn test_settings_file_with_wrong_types() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("settings.json");
    fs::write(&path, r#"{ "font": { "size": 14 } }"#)?;

    assert!(SettingsStore::open(&path).is_err());
    Ok(())
}

#[test]
fn test_settings_unknown_keys_dropped() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("settings.json");
    fs::write(&path, r#"{ "theme": "dark", "legacy": true }"#)?;

    let store = SettingsStore::open(&path)?;
    assert_eq!(store.settings().theme, "dark");
    assert!(store.to_value()?.get("legacy").is_none());
    Ok(())
}

#[test]
fn test_settings_empty_theme_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let mut store = SettingsStore::open(temp_dir.path().join("settings.json"))?;

    let result = store.update(json!({ "theme": "  " }));
    assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    assert_eq!(store.settings(), &UiSettings::default());
    Ok(())
}

#[test]
fn test_settings_empty_object_update_is_noop() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let mut store = SettingsStore::open(temp_dir.path().join("settings.json"))?;

    store.update(json!({}))?;
    assert_eq!(store.settings(), &UiSettings::default());
    Ok(())
}
