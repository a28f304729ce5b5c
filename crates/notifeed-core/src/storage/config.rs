//! TOML-based widget configuration.
//!
//! Stores user preferences including:
//! - Swipe geometry (delete button width, activation travel)
//! - Settle spring parameters
//! - Card layout and collapse timing
//! - Absolute date format for old notifications
//!
//! Configuration is stored at `~/.config/notifeed/config.toml`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::data_dir;
use crate::error::ConfigError;
use crate::swipe::{SpringConfig, SwipeConfig};
use crate::timefmt::DEFAULT_DATE_FORMAT;

/// Card layout configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardConfig {
    #[serde(default = "default_card_height")]
    pub height: f64,
    #[serde(default = "default_collapse_ms")]
    pub collapse_ms: u64,
}

/// Timestamp formatting configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatConfig {
    /// strftime pattern for notifications a day old or more.
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/notifeed/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub swipe: SwipeConfig,
    #[serde(default)]
    pub spring: SpringConfig,
    #[serde(default)]
    pub card: CardConfig,
    #[serde(default)]
    pub format: FormatConfig,
}

// Default functions
fn default_card_height() -> f64 {
    100.0
}
fn default_collapse_ms() -> u64 {
    300
}
fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.into()
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            height: default_card_height(),
            collapse_ms: default_collapse_ms(),
        }
    }
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
        }
    }
}

impl CardConfig {
    pub fn collapse_duration(&self) -> Duration {
        Duration::from_millis(self.collapse_ms)
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() || key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<f64>() {
                            serde_json::Number::from_f64(n)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                        } else {
                            return Err(invalid(format!("cannot parse '{value}' as number")));
                        }
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        return Err(invalid("cannot set a whole section".into()));
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, parsed or
    /// validated, or if the default config cannot be written.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content)?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                info!(path = %path.display(), "wrote default configuration");
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key. Does not save.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the resulting configuration is invalid. `self` is unchanged on error.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Checks value ranges serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first bad key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("swipe.action_width", self.swipe.action_width),
            ("spring.mass", self.spring.mass),
            ("spring.stiffness", self.spring.stiffness),
            ("spring.damping", self.spring.damping),
            ("card.height", self.card.height),
        ];
        for (key, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidValue {
                    key: key.into(),
                    message: format!("must be a positive number, got {value}"),
                });
            }
        }

        let non_negative = [
            ("swipe.activation_offset", self.swipe.activation_offset),
            ("spring.rest_displacement", self.spring.rest_displacement),
            ("spring.rest_speed", self.spring.rest_speed),
        ];
        for (key, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::InvalidValue {
                    key: key.into(),
                    message: format!("must not be negative, got {value}"),
                });
            }
        }

        if self.format.date_format.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "format.date_format".into(),
                message: "must not be empty".into(),
            });
        }
        if StrftimeItems::new(&self.format.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(ConfigError::InvalidValue {
                key: "format.date_format".into(),
                message: format!("'{}' is not a valid strftime pattern", self.format.date_format),
            });
        }
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }
}
