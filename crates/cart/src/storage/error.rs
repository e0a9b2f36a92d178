//! Storage error types.

use thiserror::Error;

/// Errors from a [`StorageArea`](super::StorageArea) backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The key cannot be used with this backend.
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    /// Reading or writing the backing file failed.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The value to store could not be encoded.
    #[error("Failed to encode value: {0}")]
    Encode(#[from] serde_json::Error),

    /// A lock guarding the backend was poisoned by a panicking writer.
    #[error("Storage lock poisoned")]
    Poisoned,
}
