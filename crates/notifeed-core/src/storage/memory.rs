//! In-memory notification store.

use std::sync::RwLock;

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use super::{ensure_unique_ids, NotificationStore};
use crate::error::StoreError;
use crate::notification::{Notification, Source};

/// Thread-safe store backed by a `Vec`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RwLock<Vec<Notification>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `list`.
    ///
    /// # Errors
    /// Returns [`StoreError::DuplicateId`] if two records share an id.
    pub fn from_list(list: Vec<Notification>) -> Result<Self, StoreError> {
        ensure_unique_ids(&list)?;
        Ok(Self {
            items: RwLock::new(list),
        })
    }

    /// A small development fixture: two Telegram chats and one
    /// TradingView alert, relative to `now`.
    pub fn sample(now: DateTime<Utc>) -> Self {
        Self {
            items: RwLock::new(sample_notifications(now)),
        }
    }

    /// Appends an incoming notification.
    ///
    /// # Errors
    /// Returns [`StoreError::DuplicateId`] if the id is already present.
    pub fn push(&self, notification: Notification) -> Result<(), StoreError> {
        let mut items = self.items.write().map_err(|_| StoreError::Poisoned)?;
        if items.iter().any(|n| n.id == notification.id) {
            return Err(StoreError::DuplicateId { id: notification.id });
        }
        items.push(notification);
        Ok(())
    }

    /// # Errors
    /// Returns [`StoreError::Poisoned`] if a writer panicked.
    pub fn len(&self) -> Result<usize, StoreError> {
        let items = self.items.read().map_err(|_| StoreError::Poisoned)?;
        Ok(items.len())
    }

    /// # Errors
    /// Returns [`StoreError::Poisoned`] if a writer panicked.
    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

impl NotificationStore for MemoryStore {
    fn current(&self) -> Result<Vec<Notification>, StoreError> {
        let items = self.items.read().map_err(|_| StoreError::Poisoned)?;
        Ok(items.clone())
    }

    fn remove_source(&self, source: Source) -> Result<usize, StoreError> {
        let mut items = self.items.write().map_err(|_| StoreError::Poisoned)?;
        let before = items.len();
        items.retain(|n| n.source != source);
        let removed = before - items.len();
        debug!(%source, removed, "memory store removed source");
        Ok(removed)
    }
}

/// The records behind [`MemoryStore::sample`].
pub fn sample_notifications(now: DateTime<Utc>) -> Vec<Notification> {
    vec![
        Notification::new(1, Source::Telegram, "New signal alert for BTC/USD", now)
            .with_chat(12345, "Crypto Signals"),
        Notification::new(
            2,
            Source::Telegram,
            "Market analysis for today",
            now - Duration::hours(1),
        )
        .with_chat(67890, "Trading Group"),
        Notification::new(
            3,
            Source::TradingView,
            "Price alert: BTC/USD above 50000",
            now - Duration::hours(2),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remove_source_is_idempotent() {
        let store = MemoryStore::sample(Utc::now());
        assert_eq!(store.remove_source(Source::Telegram).unwrap(), 2);
        assert_eq!(store.remove_source(Source::Telegram).unwrap(), 0);
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn push_rejects_duplicate_ids() {
        let store = MemoryStore::sample(Utc::now());
        let dup = Notification::new(3, Source::TradingView, "again", Utc::now());
        assert!(matches!(store.push(dup), Err(StoreError::DuplicateId { id: 3 })));
        assert_eq!(store.len().unwrap(), 3);
    }

    #[test]
    fn from_list_validates_ids() {
        let now = Utc::now();
        let list = vec![
            Notification::new(5, Source::Telegram, "a", now),
            Notification::new(5, Source::Telegram, "b", now),
        ];
        assert!(MemoryStore::from_list(list).is_err());
        assert!(MemoryStore::new().is_empty().unwrap());
    }

    #[test]
    fn poisoned_lock_is_an_error_everywhere() {
        let store = std::sync::Arc::new(MemoryStore::sample(Utc::now()));
        let writer = std::sync::Arc::clone(&store);
        let _ = std::thread::spawn(move || {
            let _guard = writer.items.write().unwrap();
            panic!("writer died holding the lock");
        })
        .join();

        assert!(matches!(store.len(), Err(StoreError::Poisoned)));
        assert!(matches!(store.is_empty(), Err(StoreError::Poisoned)));
        assert!(matches!(store.current(), Err(StoreError::Poisoned)));
        assert!(matches!(store.remove_source(Source::Telegram), Err(StoreError::Poisoned)));
    }
}
