//! String key-value storage areas.
//!
//! A [`StorageArea`] is the smallest useful model of browser `localStorage`:
//! string keys mapped to string values, read and replaced whole. The cart
//! persists its entire line-item list as one value, so a backend only needs
//! to guarantee that `set_item` replaces a value atomically.
//!
//! # Backends
//!
//! - [`MemoryStorage`] - In-process map, for tests and ephemeral sessions
//! - [`FileStorage`] - One JSON file per key inside a directory

mod error;
mod file;
mod memory;

use std::fmt::Debug;

pub use error::StorageError;
pub use file::FileStorage;
pub use memory::MemoryStorage;

/// A string key-value storage backend.
///
/// All methods take `&self`; implementations use interior mutability so a
/// single area can be shared behind an `Arc`.
pub trait StorageArea: Send + Sync + Debug {
    /// Retrieve the value stored under `key`.
    ///
    /// Returns `Ok(None)` if the key does not exist.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Insert or replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the value stored under `key`.
    ///
    /// Returns `Ok(())` even if the key did not exist.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// Check that `key` can be used as a storage key.
///
/// Keys must be non-empty and must not contain path separators or `..`,
/// since the file backend maps keys onto file names.
///
/// # Errors
///
/// Returns `StorageError::InvalidKey` describing the problem.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    if key.trim().is_empty() {
        return Err(StorageError::InvalidKey("key cannot be empty".to_string()));
    }
    if key.contains(['/', '\\']) {
        return Err(StorageError::InvalidKey(format!(
            "key must not contain path separators: {key}"
        )));
    }
    if key.contains("..") {
        return Err(StorageError::InvalidKey(format!(
            "key must not contain '..': {key}"
        )));
    }
    Ok(())
}
