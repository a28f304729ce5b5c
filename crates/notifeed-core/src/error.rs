//! Core error types for notifeed-core.
//!
//! The swipe and aggregation logic itself cannot fail; errors only come from
//! the edges: the injected notification store and the configuration file.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for notifeed-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Notification store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors raised by a [`NotificationStore`](crate::storage::NotificationStore).
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backing list could not be read
    #[error("Failed to read notifications from {path}: {message}")]
    ReadFailed { path: PathBuf, message: String },

    /// The backing list could not be written after a removal
    #[error("Failed to write notifications to {path}: {message}")]
    WriteFailed { path: PathBuf, message: String },

    /// Two records share the same id
    #[error("Duplicate notification id {id}")]
    DuplicateId { id: i64 },

    /// The store lock was poisoned by a panicking writer
    #[error("Notification store lock poisoned")]
    Poisoned,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Home/config directory could not be determined
    #[error("Could not determine the configuration directory")]
    NoDataDir,
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_error_wraps_into_core_error() {
        let err: CoreError = StoreError::DuplicateId { id: 7 }.into();
        assert_eq!(err.to_string(), "Store error: Duplicate notification id 7");
    }

    #[test]
    fn toml_errors_become_parse_failures() {
        let parse = toml::from_str::<toml::Value>("not = [valid").unwrap_err();
        let err: ConfigError = parse.into();
        assert!(matches!(err, ConfigError::ParseFailed(_)));
    }
}
