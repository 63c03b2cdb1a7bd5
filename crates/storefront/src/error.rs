//! Error types for the storage and store layers.
//!
//! Plain reads never surface errors to consumers (a list that cannot be read
//! is an empty list). Mutations do, including the read before the write: a
//! file backend can run out of disk or lose permissions, and the caller
//! decides what to tell the user.

use thiserror::Error;

/// A storage backend operation failed.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("I/O error for key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The key cannot be used as a storage name.
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    /// A backend lock was poisoned by a panicking writer.
    #[error("Storage lock poisoned")]
    Poisoned,
}

/// A list store operation failed.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Storage backend operation failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The list could not be serialized.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The origin write lock was poisoned by a panicking writer.
    #[error("Store lock poisoned")]
    Poisoned,
}

/// Result type alias for `StoreError`.
pub type Result<T> = std::result::Result<T, StoreError>;
