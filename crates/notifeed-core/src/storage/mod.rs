mod config;
mod json_file;
mod memory;

pub use config::{CardConfig, Config, FormatConfig};
pub use json_file::JsonFileStore;
pub use memory::{sample_notifications, MemoryStore};

use std::collections::HashSet;
use std::path::PathBuf;

use crate::error::{ConfigError, StoreError};
use crate::notification::{Notification, Source};

/// Where the widget's notifications come from.
///
/// The widget reads the current list and, on a committed delete, asks the
/// store to drop a whole source. It never writes individual records.
pub trait NotificationStore: Send + Sync {
    /// The current list, in arrival order.
    fn current(&self) -> Result<Vec<Notification>, StoreError>;

    /// Removes every notification of `source`. Returns how many were removed;
    /// removing an absent source is a successful no-op.
    fn remove_source(&self, source: Source) -> Result<usize, StoreError>;
}

impl<S: NotificationStore + ?Sized> NotificationStore for std::sync::Arc<S> {
    fn current(&self) -> Result<Vec<Notification>, StoreError> {
        (**self).current()
    }

    fn remove_source(&self, source: Source) -> Result<usize, StoreError> {
        (**self).remove_source(source)
    }
}

/// Rejects lists where two records share an id.
pub(crate) fn ensure_unique_ids(list: &[Notification]) -> Result<(), StoreError> {
    let mut seen = HashSet::with_capacity(list.len());
    for n in list {
        if !seen.insert(n.id) {
            return Err(StoreError::DuplicateId { id: n.id });
        }
    }
    Ok(())
}

/// Returns `~/.config/notifeed[-dev]/` based on NOTIFEED_ENV.
///
/// Set NOTIFEED_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if the home directory cannot be determined or if
/// creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir().ok_or(ConfigError::NoDataDir)?.join(".config");

    let env = std::env::var("NOTIFEED_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("notifeed-dev")
    } else {
        base_dir.join("notifeed")
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::SaveFailed {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}

/// Default location of the JSON notification list used by the CLI.
pub fn default_notifications_path() -> Result<PathBuf, ConfigError> {
    Ok(data_dir()?.join("notifications.json"))
}
