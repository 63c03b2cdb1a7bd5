//! The origin: storage shared by every tab, and per-tab handles onto it.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use tokio::sync::broadcast;
use uuid::Uuid;

use super::{FileBackend, MemoryBackend, StorageBackend};
use crate::config::StorefrontConfig;
use crate::error::{StorageError, StoreError};
use crate::tab::Tab;

/// Identifies one tab (browsing context) of an origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TabId(Uuid);

impl TabId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TabId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A value under `key` was replaced or removed by the tab `source`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageChange {
    pub key: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub source: TabId,
    pub changed_at: DateTime<Utc>,
}

/// Storage shared by all tabs of one site.
///
/// Cheaply cloneable via `Arc`. Construct once at startup and hand tabs out
/// with [`Origin::open_tab`].
#[derive(Clone)]
pub struct Origin {
    inner: Arc<OriginInner>,
}

struct OriginInner {
    config: StorefrontConfig,
    backend: Box<dyn StorageBackend>,
    changes: broadcast::Sender<StorageChange>,
    write_lock: Mutex<()>,
}

impl Origin {
    /// Create an origin over any backend.
    #[must_use]
    pub fn new(backend: impl StorageBackend + 'static, config: StorefrontConfig) -> Self {
        let (changes, _) = broadcast::channel(config.event_capacity.max(1));
        Self {
            inner: Arc::new(OriginInner {
                config,
                backend: Box::new(backend),
                changes,
                write_lock: Mutex::new(()),
            }),
        }
    }

    /// An origin whose values live only as long as the process.
    #[must_use]
    pub fn in_memory(config: StorefrontConfig) -> Self {
        Self::new(MemoryBackend::new(), config)
    }

    /// An origin persisted under `config.storage_dir`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the directory cannot be created.
    pub fn open(config: StorefrontConfig) -> Result<Self, StorageError> {
        let backend = FileBackend::open(&config.storage_dir)?;
        tracing::debug!(dir = %backend.dir().display(), "Opened file storage");
        Ok(Self::new(backend, config))
    }

    /// Open a new tab on this origin.
    #[must_use]
    pub fn open_tab(&self) -> Tab {
        Tab::open(self)
    }

    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Serialize a read-modify-write cycle against every other writer of
    /// this origin.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Poisoned` if a previous writer panicked.
    pub fn write_lock(&self) -> Result<MutexGuard<'_, ()>, StoreError> {
        self.inner.write_lock.lock().map_err(|_| StoreError::Poisoned)
    }

    fn backend(&self) -> &dyn StorageBackend {
        self.inner.backend.as_ref()
    }

    fn subscribe_changes(&self) -> broadcast::Receiver<StorageChange> {
        self.inner.changes.subscribe()
    }

    fn announce(&self, change: StorageChange) {
        // No listeners is fine; the value is already persisted.
        let _ = self.inner.changes.send(change);
    }
}

impl fmt::Debug for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Origin")
            .field("config", &self.inner.config)
            .field("listeners", &self.inner.changes.receiver_count())
            .finish_non_exhaustive()
    }
}

/// One tab's view of the origin's storage.
///
/// Writes through this handle are announced to every *other* tab; listeners
/// obtained from [`LocalStorage::subscribe`] drop changes made by their own
/// tab.
#[derive(Clone, Debug)]
pub struct LocalStorage {
    origin: Origin,
    tab: TabId,
}

impl LocalStorage {
    #[must_use]
    pub const fn new(origin: Origin, tab: TabId) -> Self {
        Self { origin, tab }
    }

    #[must_use]
    pub const fn tab(&self) -> TabId {
        self.tab
    }

    #[must_use]
    pub const fn origin(&self) -> &Origin {
        &self.origin
    }

    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    pub fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.origin.backend().get(key)
    }

    /// Replace the value under `key` and notify other tabs if it changed.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    pub fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let backend = self.origin.backend();
        let old_value = backend.get(key).ok().flatten();
        backend.set(key, value)?;

        if old_value.as_deref() != Some(value) {
            self.announce(key, old_value, Some(value.to_string()));
        }
        Ok(())
    }

    /// Delete `key` and notify other tabs if it existed.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        let backend = self.origin.backend();
        let old_value = backend.get(key).ok().flatten();
        backend.remove(key)?;

        if old_value.is_some() {
            self.announce(key, old_value, None);
        }
        Ok(())
    }

    /// Listen for changes made by other tabs.
    #[must_use]
    pub fn subscribe(&self) -> StorageListener {
        StorageListener {
            receiver: self.origin.subscribe_changes(),
            tab: self.tab,
        }
    }

    fn announce(&self, key: &str, old_value: Option<String>, new_value: Option<String>) {
        tracing::debug!(key, tab = %self.tab, "Storage value changed");
        self.origin.announce(StorageChange {
            key: key.to_string(),
            old_value,
            new_value,
            source: self.tab,
            changed_at: Utc::now(),
        });
    }
}

/// Receives storage changes made by tabs other than its own.
#[derive(Debug)]
pub struct StorageListener {
    receiver: broadcast::Receiver<StorageChange>,
    tab: TabId,
}

/// Outcome of polling a [`StorageListener`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListenEvent {
    /// Another tab changed a value.
    Changed(StorageChange),
    /// The listener fell behind and missed this many changes.
    Lagged(u64),
}

impl StorageListener {
    /// Next change from another tab, if one is already queued.
    pub fn try_recv(&mut self) -> Option<ListenEvent> {
        loop {
            match self.receiver.try_recv() {
                Ok(change) if change.source == self.tab => {}
                Ok(change) => return Some(ListenEvent::Changed(change)),
                Err(broadcast::error::TryRecvError::Lagged(missed)) => {
                    return Some(ListenEvent::Lagged(missed));
                }
                Err(
                    broadcast::error::TryRecvError::Empty | broadcast::error::TryRecvError::Closed,
                ) => return None,
            }
        }
    }

    /// Wait for the next change from another tab.
    ///
    /// Never resolves to `None` while the origin is alive.
    pub async fn recv(&mut self) -> Option<ListenEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(change) if change.source == self.tab => {}
                Ok(change) => return Some(ListenEvent::Changed(change)),
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    return Some(ListenEvent::Lagged(missed));
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn origin() -> Origin {
        Origin::in_memory(StorefrontConfig::default())
    }

    #[test]
    fn test_tabs_share_values() {
        let origin = origin();
        let a = LocalStorage::new(origin.clone(), TabId::new());
        let b = LocalStorage::new(origin, TabId::new());

        a.set("k", "v").unwrap();
        assert_eq!(b.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_change_reaches_other_tabs_only() {
        let origin = origin();
        let a = LocalStorage::new(origin.clone(), TabId::new());
        let b = LocalStorage::new(origin, TabId::new());
        let mut a_listener = a.subscribe();
        let mut b_listener = b.subscribe();

        a.set("k", "v").unwrap();

        assert_eq!(a_listener.try_recv(), None);
        let Some(ListenEvent::Changed(change)) = b_listener.try_recv() else {
            panic!("expected a change in the other tab");
        };
        assert_eq!(change.key, "k");
        assert_eq!(change.old_value, None);
        assert_eq!(change.new_value.as_deref(), Some("v"));
        assert_eq!(change.source, a.tab());
    }

    #[test]
    fn test_unchanged_value_is_not_announced() {
        let origin = origin();
        let a = LocalStorage::new(origin.clone(), TabId::new());
        let b = LocalStorage::new(origin, TabId::new());
        a.set("k", "v").unwrap();

        let mut listener = b.subscribe();
        a.set("k", "v").unwrap();
        assert_eq!(listener.try_recv(), None);
    }

    #[test]
    fn test_remove_is_announced() {
        let origin = origin();
        let a = LocalStorage::new(origin.clone(), TabId::new());
        let b = LocalStorage::new(origin, TabId::new());
        a.set("k", "v").unwrap();

        let mut listener = b.subscribe();
        a.remove("k").unwrap();
        a.remove("k").unwrap();

        let Some(ListenEvent::Changed(change)) = listener.try_recv() else {
            panic!("expected a removal");
        };
        assert_eq!(change.new_value, None);
        assert_eq!(listener.try_recv(), None);
    }

    #[test]
    fn test_lagged_listener_reports_missed_changes() {
        let config = StorefrontConfig {
            event_capacity: 1,
            ..StorefrontConfig::default()
        };
        let origin = Origin::in_memory(config);
        let a = LocalStorage::new(origin.clone(), TabId::new());
        let b = LocalStorage::new(origin, TabId::new());
        let mut listener = b.subscribe();

        a.set("k", "1").unwrap();
        a.set("k", "2").unwrap();
        a.set("k", "3").unwrap();

        assert_eq!(listener.try_recv(), Some(ListenEvent::Lagged(2)));
        let Some(ListenEvent::Changed(change)) = listener.try_recv() else {
            panic!("expected the latest change");
        };
        assert_eq!(change.new_value.as_deref(), Some("3"));
    }

    #[tokio::test]
    async fn test_recv_waits_for_other_tab() {
        let origin = origin();
        let a = LocalStorage::new(origin.clone(), TabId::new());
        let b = LocalStorage::new(origin, TabId::new());
        let mut listener = b.subscribe();

        let writer = tokio::spawn(async move {
            a.set("k", "v").unwrap();
        });
        writer.await.unwrap();

        let Some(ListenEvent::Changed(change)) = listener.recv().await else {
            panic!("expected a change");
        };
        assert_eq!(change.new_value.as_deref(), Some("v"));
    }
}
