//! UI settings and their store
//!
//! The front-end reads settings as a generic JSON tree and writes partial
//! trees back. Internally the settings have a typed schema; every update is
//! merged into the current tree, decoded into [`UiSettings`] and validated
//! before anything is kept.

use crate::merge::deep_merge;
use crate::persistence::{backup_existing, write_atomic};
use crate::validation::{ConfigSection, ValidationError, Validator};
use crate::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Font used by the reader UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontSettings {
    pub family: String,
    /// CSS size with units, e.g. "14px"
    pub size: String,
}

/// Preferences shown by the front-end
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiSettings {
    pub theme: String,
    pub font: FontSettings,
    /// Scheme name ("dark", "light", ...) to role name to hex color
    pub color_scheme: BTreeMap<String, BTreeMap<String, String>>,
}

fn palette(background: &str, foreground: &str, primary: &str, secondary: &str) -> BTreeMap<String, String> {
    [
        ("background", background),
        ("foreground", foreground),
        ("primary", primary),
        ("secondary", secondary),
    ]
    .into_iter()
    .map(|(role, color)| (role.to_string(), color.to_string()))
    .collect()
}

impl Default for UiSettings {
    fn default() -> Self {
        let mut color_scheme = BTreeMap::new();
        color_scheme.insert(
            "dark".to_string(),
            palette("#121212", "#ffffff", "#bb86fc", "#03dac6"),
        );
        color_scheme.insert(
            "light".to_string(),
            palette("#ffffff", "#000000", "#6200ee", "#03dac6"),
        );

        Self {
            theme: "light".to_string(),
            font: FontSettings {
                family: "system-ui".to_string(),
                size: "14px".to_string(),
            },
            color_scheme,
        }
    }
}

impl UiSettings {
    /// Returns the settings as a generic JSON tree
    pub fn to_value(&self) -> ConfigResult<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Returns a copy with `partial` deep-merged in
    ///
    /// Fails with a validation error if the merged tree no longer fits the
    /// schema or holds invalid values; `self` is never modified.
    pub fn merged_with(&self, partial: Value) -> ConfigResult<UiSettings> {
        let patch = match partial {
            Value::Object(map) => map,
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "settings update must be a JSON object, got {}",
                    json_type_name(&other)
                )))
            }
        };

        let mut tree = self.to_object()?;
        deep_merge(&mut tree, patch);

        let merged: UiSettings = serde_json::from_value(Value::Object(tree))
            .map_err(|e| ConfigError::ValidationError(format!("invalid settings: {}", e)))?;

        if let Err(errors) = merged.validate() {
            return Err(ConfigError::ValidationError(ValidationError::join(&errors)));
        }

        Ok(merged)
    }

    fn to_object(&self) -> ConfigResult<Map<String, Value>> {
        match self.to_value()? {
            Value::Object(map) => Ok(map),
            _ => Err(ConfigError::ValidationError(
                "settings did not serialize to an object".to_string(),
            )),
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl ConfigSection for UiSettings {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut results = vec![
            Validator::not_empty(&self.theme, "theme"),
            Validator::not_empty(&self.font.family, "font.family"),
            Validator::not_empty(&self.font.size, "font.size"),
        ];

        for (scheme, roles) in &self.color_scheme {
            for (role, color) in roles {
                results.push(Validator::hex_color(
                    color,
                    &format!("colorScheme.{}.{}", scheme, role),
                ));
            }
        }

        Validator::collect_errors(results)
    }

    fn merge(&mut self, other: Self) {
        self.theme = other.theme;
        self.font = other.font;
        self.color_scheme = other.color_scheme;
    }

    fn section_name(&self) -> &'static str {
        "settings"
    }
}

/// Owns the UI settings and their JSON file
#[derive(Debug)]
pub struct SettingsStore {
    settings: UiSettings,
    path: PathBuf,
}

impl SettingsStore {
    /// Loads settings from `path`, writing the defaults if the file is absent
    ///
    /// Keys missing from the file keep their default values. A malformed file
    /// is an error and is left untouched.
    pub fn open(path: impl Into<PathBuf>) -> ConfigResult<Self> {
        let path = path.into();

        if !path.exists() {
            log::info!(
                "Settings file not found at {}, writing defaults",
                path.display()
            );
            let store = Self {
                settings: UiSettings::default(),
                path,
            };
            store.save()?;
            return Ok(store);
        }

        let settings = Self::read(&path)?;
        log::debug!("Loaded settings from {}", path.display());
        Ok(Self { settings, path })
    }

    fn read(path: &Path) -> ConfigResult<UiSettings> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let stored: Value =
            serde_json::from_str(&contents).map_err(|e| ConfigError::JsonParseError {
                path: path.to_path_buf(),
                source: e,
            })?;

        let Value::Object(stored) = stored else {
            return Err(ConfigError::ValidationError(format!(
                "settings file {} must contain a JSON object",
                path.display()
            )));
        };

        let mut tree = UiSettings::default().to_object()?;
        deep_merge(&mut tree, stored);

        let settings: UiSettings =
            serde_json::from_value(Value::Object(tree)).map_err(|e| {
                ConfigError::JsonParseError {
                    path: path.to_path_buf(),
                    source: e,
                }
            })?;

        // Hand-edited values are kept; the front-end can still fix them
        if let Err(errors) = settings.validate() {
            log::warn!(
                "Settings validation warnings: {}",
                ValidationError::join(&errors)
            );
        }

        Ok(settings)
    }

    /// Current settings
    pub fn settings(&self) -> &UiSettings {
        &self.settings
    }

    /// Current settings as a generic JSON tree
    pub fn to_value(&self) -> ConfigResult<Value> {
        self.settings.to_value()
    }

    /// Deep-merges `partial` into the settings and persists the result
    pub fn update(&mut self, partial: Value) -> ConfigResult<&UiSettings> {
        let merged = self.settings.merged_with(partial)?;
        let previous = std::mem::replace(&mut self.settings, merged);

        if let Err(e) = self.save() {
            self.settings = previous;
            return Err(e);
        }

        log::info!("Settings updated");
        Ok(&self.settings)
    }

    /// Restores the built-in defaults and persists them
    pub fn reset(&mut self) -> ConfigResult<()> {
        let previous = std::mem::take(&mut self.settings);

        if let Err(e) = self.save() {
            self.settings = previous;
            return Err(e);
        }

        log::info!("Settings reset to defaults");
        Ok(())
    }

    /// Writes the current settings to disk
    pub fn save(&self) -> ConfigResult<()> {
        let json = serde_json::to_string_pretty(&self.settings)?;

        backup_existing(&self.path).map_err(|e| ConfigError::BackupError { source: e })?;
        write_atomic(&self.path, json.as_bytes()).map_err(|e| ConfigError::WriteError {
            path: self.path.clone(),
            source: e,
        })?;

        log::debug!("Settings saved to {}", self.path.display());
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
