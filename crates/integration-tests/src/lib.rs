//! Integration tests for Tressa.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p tressa-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_properties` - Invariants that hold across arbitrary mutation sequences
//! - `cart_file_storage` - Cart persistence through the JSON-file backend
//!
//! This crate also holds the shared fixtures those tests build carts from.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rust_decimal::Decimal;
use tressa_cart::{
    CartPersistence, CartStore, DEFAULT_CART_KEY, MemoryStorage, StorageArea, StorageError,
};
use tressa_core::{CartProduct, ProductId};

/// A cart store over fresh in-memory storage, plus the storage itself.
#[must_use]
pub fn memory_store() -> (Arc<MemoryStorage>, CartStore) {
    let storage = Arc::new(MemoryStorage::new());
    let store = CartStore::new(CartPersistence::new(storage.clone(), DEFAULT_CART_KEY));
    (storage, store)
}

/// In-memory storage whose writes can be made to fail, for exercising the
/// store's behavior when the backend rejects a write.
#[derive(Debug, Default)]
pub struct SwitchableStorage {
    inner: MemoryStorage,
    failing: AtomicBool,
}

impl SwitchableStorage {
    /// Make subsequent `set_item`/`remove_item` calls fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check_writable(&self) -> Result<(), StorageError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StorageError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "storage is read-only",
            )));
        }
        Ok(())
    }
}

impl StorageArea for SwitchableStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check_writable()?;
        self.inner.set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.check_writable()?;
        self.inner.remove_item(key)
    }
}

/// A cart store over [`SwitchableStorage`], plus the storage itself.
#[must_use]
pub fn switchable_store() -> (Arc<SwitchableStorage>, CartStore) {
    let storage = Arc::new(SwitchableStorage::default());
    let store = CartStore::new(CartPersistence::new(storage.clone(), DEFAULT_CART_KEY));
    (storage, store)
}

/// Parse a product id known to be valid.
///
/// # Panics
///
/// Panics if `id` is empty.
#[must_use]
pub fn product_id(id: &str) -> ProductId {
    ProductId::parse(id).expect("fixture product id must be valid")
}

/// A product with the given id and price in cents.
#[must_use]
pub fn product(id: &str, cents: i64) -> CartProduct {
    CartProduct::new(
        product_id(id),
        format!("Tressa {id}"),
        format!("/images/{id}.webp"),
        Decimal::new(cents, 2),
    )
}
