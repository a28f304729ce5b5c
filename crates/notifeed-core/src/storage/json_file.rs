//! Notification list kept in a JSON file.
//!
//! The file holds a JSON array of notifications. A missing file reads as an
//! empty list. Removals rewrite the whole file.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, info};

use super::{ensure_unique_ids, NotificationStore};
use crate::error::StoreError;
use crate::notification::{Notification, Source};

#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replaces the file contents with `list`.
    ///
    /// # Errors
    /// Returns an error on duplicate ids or if the file cannot be written.
    pub fn write_all(&self, list: &[Notification]) -> Result<(), StoreError> {
        ensure_unique_ids(list)?;
        let _guard = self.write_lock.lock().map_err(|_| StoreError::Poisoned)?;
        self.write_unlocked(list)
    }

    fn read(&self) -> Result<Vec<Notification>, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "notification file missing, treating as empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(self.read_failed(e)),
        };
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        let list: Vec<Notification> =
            serde_json::from_str(&content).map_err(|e| self.read_failed(e))?;
        ensure_unique_ids(&list)?;
        Ok(list)
    }

    fn write_unlocked(&self, list: &[Notification]) -> Result<(), StoreError> {
        let write_failed = |e: &dyn std::fmt::Display| StoreError::WriteFailed {
            path: self.path.clone(),
            message: e.to_string(),
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| write_failed(&e))?;
        }
        let json = serde_json::to_string_pretty(list).map_err(|e| write_failed(&e))?;
        std::fs::write(&self.path, json).map_err(|e| write_failed(&e))
    }

    fn read_failed(&self, e: impl std::fmt::Display) -> StoreError {
        StoreError::ReadFailed {
            path: self.path.clone(),
            message: e.to_string(),
        }
    }
}

impl NotificationStore for JsonFileStore {
    fn current(&self) -> Result<Vec<Notification>, StoreError> {
        self.read()
    }

    fn remove_source(&self, source: Source) -> Result<usize, StoreError> {
        let _guard = self.write_lock.lock().map_err(|_| StoreError::Poisoned)?;
        let mut list = self.read()?;
        let before = list.len();
        list.retain(|n| n.source != source);
        let removed = before - list.len();
        if removed > 0 {
            self.write_unlocked(&list)?;
            info!(%source, removed, path = %self.path.display(), "removed source from file");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sample_notifications;
    use chrono::Utc;

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("none.json"));
        assert!(store.current().unwrap().is_empty());
        assert_eq!(store.remove_source(Source::Telegram).unwrap(), 0);
        assert!(!store.path().exists());
    }

    #[test]
    fn remove_source_rewrites_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested").join("list.json"));
        store.write_all(&sample_notifications(Utc::now())).unwrap();

        assert_eq!(store.remove_source(Source::TradingView).unwrap(), 1);
        let left = store.current().unwrap();
        assert_eq!(left.len(), 2);
        assert!(left.iter().all(|n| n.source == Source::Telegram));
    }

    #[test]
    fn malformed_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();
        let store = JsonFileStore::new(&path);
        assert!(matches!(store.current(), Err(StoreError::ReadFailed { .. })));
    }
}
