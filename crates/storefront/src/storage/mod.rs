//! Origin-scoped key/value storage.
//!
//! This is the persistence layer the list store sits on: a string-to-string
//! map shared by every tab of one origin, plus a change bus that tells the
//! *other* tabs when a value was replaced.
//!
//! # Backends
//!
//! - [`MemoryBackend`] - process-local map, used by tests and previews
//! - [`FileBackend`] - one JSON file per key, survives restarts

mod file;
mod memory;
mod origin;

pub use file::FileBackend;
pub use memory::MemoryBackend;
pub use origin::{ListenEvent, LocalStorage, Origin, StorageChange, StorageListener, TabId};

use crate::error::StorageError;

/// A string key/value store shared by all tabs of an origin.
///
/// Implementations replace values whole; a reader never observes a partially
/// written value.
pub trait StorageBackend: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Deleting an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Keys are limited to ASCII letters, digits, `-` and `_`.
#[must_use]
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_key() {
        assert!(is_valid_key("plantomartCart"));
        assert!(is_valid_key("cart_v2-beta"));
        assert!(!is_valid_key(""));
        assert!(!is_valid_key("../etc"));
        assert!(!is_valid_key("a b"));
        assert!(!is_valid_key("cart.json"));
    }
}
