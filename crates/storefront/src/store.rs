//! Persisted list store.
//!
//! Each list kind lives under its own storage key as a bare JSON array. There
//! is no cross-key transaction; a consumer needing both lists reads each one.
//!
//! Loading is fail-open: an absent key, an unreadable backend, malformed JSON
//! or a list that breaks an invariant all load as an empty list. The cause is
//! logged and never reaches the caller.

use std::fmt;
use std::marker::PhantomData;

use plantomart_core::{CartList, EntryList, ListError, WishlistList};
use thiserror::Error;
use tracing::{debug, error};

use crate::config::{DEFAULT_CART_KEY, DEFAULT_WISHLIST_KEY};
use crate::error::Result;
use crate::notifier::ListEvent;
use crate::storage::LocalStorage;

/// The two independent lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    Cart,
    Wishlist,
}

impl ListKind {
    /// Default storage key. `StorageKeys` may override it.
    #[must_use]
    pub const fn storage_key(self) -> &'static str {
        match self {
            Self::Cart => DEFAULT_CART_KEY,
            Self::Wishlist => DEFAULT_WISHLIST_KEY,
        }
    }

    /// Name of the same-tab event announcing a new version of this list.
    #[must_use]
    pub const fn event_name(self) -> &'static str {
        match self {
            Self::Cart => "cartUpdated",
            Self::Wishlist => "wishlistUpdated",
        }
    }
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cart => f.write_str("cart"),
            Self::Wishlist => f.write_str("wishlist"),
        }
    }
}

/// A list type that can be persisted and announced.
pub trait StoredList: EntryList + 'static {
    const KIND: ListKind;

    /// Wrap the list in its update event.
    fn into_event(self) -> ListEvent;
}

impl StoredList for CartList {
    const KIND: ListKind = ListKind::Cart;

    fn into_event(self) -> ListEvent {
        ListEvent::CartUpdated(self)
    }
}

impl StoredList for WishlistList {
    const KIND: ListKind = ListKind::Wishlist;

    fn into_event(self) -> ListEvent {
        ListEvent::WishlistUpdated(self)
    }
}

/// Why a stored value was discarded.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid list: {0}")]
    Invalid(#[from] ListError),
}

/// Parse and validate a stored list.
///
/// # Errors
///
/// Returns `DecodeError` if the value is not a JSON array of valid entries or
/// if two entries share an id.
pub fn decode<L: EntryList>(raw: &str) -> std::result::Result<L, DecodeError> {
    let list: L = serde_json::from_str(raw)?;
    list.validate()?;
    Ok(list)
}

/// Reads and writes one list kind through a tab's storage handle.
pub struct ListStore<L> {
    storage: LocalStorage,
    key: String,
    _list: PhantomData<fn() -> L>,
}

impl<L> Clone for ListStore<L> {
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            key: self.key.clone(),
            _list: PhantomData,
        }
    }
}

impl<L> fmt::Debug for ListStore<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListStore")
            .field("key", &self.key)
            .field("tab", &self.storage.tab())
            .finish()
    }
}

impl<L: StoredList> ListStore<L> {
    /// A store for `L` under the key configured for its kind.
    #[must_use]
    pub fn new(storage: LocalStorage) -> Self {
        let key = storage.origin().config().keys.key(L::KIND).to_string();
        Self {
            storage,
            key,
            _list: PhantomData,
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub const fn storage(&self) -> &LocalStorage {
        &self.storage
    }

    /// Read the list. Never fails; see the module docs.
    #[must_use]
    pub fn load(&self) -> L {
        match self.storage.get(&self.key) {
            Ok(raw) => self.decode_or_empty(raw),
            Err(e) => {
                error!(key = %self.key, error = %e, "Failed to read {} data", L::KIND);
                L::default()
            }
        }
    }

    /// Read the list before changing it.
    ///
    /// Unlike [`load`](Self::load), a backend read failure is returned so the
    /// caller does not save over data it could not see. Corrupt data still
    /// reads as an empty list.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Storage` if the backend cannot be read.
    pub fn load_for_update(&self) -> Result<L> {
        let raw = self.storage.get(&self.key)?;
        Ok(self.decode_or_empty(raw))
    }

    fn decode_or_empty(&self, raw: Option<String>) -> L {
        let Some(raw) = raw else {
            return L::default();
        };

        match decode::<L>(&raw) {
            Ok(list) => {
                debug!(key = %self.key, entries = list.len(), "Loaded {}", L::KIND);
                list
            }
            Err(e) => {
                error!(key = %self.key, error = %e, "Failed to parse {} data", L::KIND);
                L::default()
            }
        }
    }

    /// Replace the stored list.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the list cannot be serialized or written.
    pub fn save(&self, list: &L) -> Result<()> {
        let raw = serde_json::to_string(list)?;
        self.storage.set(&self.key, &raw)?;
        debug!(key = %self.key, entries = list.len(), "Saved {}", L::KIND);
        Ok(())
    }
}
