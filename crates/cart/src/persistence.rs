//! Persistence adapter for the cart's line-item list.
//!
//! The adapter owns the fixed storage key and the JSON encoding. Its read
//! path is total: a missing value, a malformed value, a failing backend, and
//! a detached adapter all load as an empty cart. Writes report failures to
//! the caller, which decides whether the mutation happened.

use std::sync::Arc;

use tressa_core::LineItem;

use crate::storage::{StorageArea, StorageError};

/// Storage key used when none is configured.
pub const DEFAULT_CART_KEY: &str = "tressa_cart";

/// Reads and writes the serialized cart under one storage key.
///
/// A *detached* adapter has no storage context (e.g. rendering outside a
/// client session): loads return an empty list and writes do nothing.
#[derive(Debug, Clone)]
pub struct CartPersistence {
    area: Option<Arc<dyn StorageArea>>,
    key: String,
}

impl CartPersistence {
    /// Create an adapter that stores the cart under `key` in `area`.
    #[must_use]
    pub fn new(area: Arc<dyn StorageArea>, key: impl Into<String>) -> Self {
        Self {
            area: Some(area),
            key: key.into(),
        }
    }

    /// Create an adapter with no storage context.
    #[must_use]
    pub fn detached() -> Self {
        Self {
            area: None,
            key: DEFAULT_CART_KEY.to_string(),
        }
    }

    /// Whether a storage context is available.
    #[must_use]
    pub const fn is_attached(&self) -> bool {
        self.area.is_some()
    }

    /// The storage key holding the cart.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Load the persisted line items.
    ///
    /// Returns an empty list if nothing is stored, the stored value does not
    /// parse, the backend fails, or the adapter is detached.
    #[must_use]
    pub fn load(&self) -> Vec<LineItem> {
        let Some(area) = &self.area else {
            return Vec::new();
        };

        let raw = match area.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(
                    key = %self.key,
                    error = %e,
                    "Failed to read cart; treating as empty"
                );
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<LineItem>>(&raw) {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(
                    key = %self.key,
                    error = %e,
                    "Malformed cart data; treating as empty"
                );
                Vec::new()
            }
        }
    }

    /// Replace the persisted line items with `items`.
    ///
    /// A detached adapter accepts the write and stores nothing.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the items cannot be encoded or the backend
    /// rejects the write.
    pub fn save(&self, items: &[LineItem]) -> Result<(), StorageError> {
        let Some(area) = &self.area else {
            return Ok(());
        };

        let raw = serde_json::to_string(items)?;
        area.set_item(&self.key, &raw)
    }

    /// Remove the persisted value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend rejects the removal.
    pub fn clear(&self) -> Result<(), StorageError> {
        match &self.area {
            Some(area) => area.remove_item(&self.key),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;
    use tressa_core::{CartProduct, ProductId};

    use super::*;
    use crate::storage::MemoryStorage;

    fn item(id: &str, cents: i64, quantity: u32) -> LineItem {
        LineItem::from_product(
            CartProduct::new(ProductId::parse(id).unwrap(), id, "", Decimal::new(cents, 2)),
            quantity,
        )
    }

    fn attached() -> (Arc<MemoryStorage>, CartPersistence) {
        let storage = Arc::new(MemoryStorage::new());
        let persistence = CartPersistence::new(storage.clone(), DEFAULT_CART_KEY);
        (storage, persistence)
    }

    #[test]
    fn test_load_missing_is_empty() {
        let (_, persistence) = attached();
        assert!(persistence.load().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let (_, persistence) = attached();
        let items = vec![item("p1", 1000, 2), item("p2", 2499, 1)];

        persistence.save(&items).unwrap();

        assert_eq!(persistence.load(), items);
    }

    #[test]
    fn test_save_writes_under_key() {
        let (storage, persistence) = attached();
        persistence.save(&[item("p1", 1000, 1)]).unwrap();

        let raw = storage.get_item(DEFAULT_CART_KEY).unwrap().unwrap();
        assert!(raw.starts_with('['));
        assert!(raw.contains("\"id\":\"p1\""));
    }

    #[test]
    fn test_malformed_value_loads_empty() {
        let (storage, persistence) = attached();
        storage.set_item(DEFAULT_CART_KEY, "{not json").unwrap();

        assert!(persistence.load().is_empty());
    }

    #[test]
    fn test_wrong_shape_loads_empty() {
        let (storage, persistence) = attached();
        storage
            .set_item(DEFAULT_CART_KEY, r#"{"id":"p1"}"#)
            .unwrap();

        assert!(persistence.load().is_empty());
    }

    #[test]
    fn test_empty_id_loads_empty() {
        let (storage, persistence) = attached();
        storage
            .set_item(
                DEFAULT_CART_KEY,
                r#"[{"id":"","name":"x","image":"","price":1,"quantity":1}]"#,
            )
            .unwrap();

        assert!(persistence.load().is_empty());
    }

    #[test]
    fn test_clear_removes_value() {
        let (storage, persistence) = attached();
        persistence.save(&[item("p1", 1000, 1)]).unwrap();
        persistence.clear().unwrap();

        assert!(storage.is_empty());
        assert!(persistence.load().is_empty());
    }

    #[test]
    fn test_detached_is_inert() {
        let persistence = CartPersistence::detached();
        assert!(!persistence.is_attached());

        persistence.save(&[item("p1", 1000, 1)]).unwrap();
        assert!(persistence.load().is_empty());
        persistence.clear().unwrap();
    }

    #[derive(Debug)]
    struct ReadOnlyStorage;

    impl StorageArea for ReadOnlyStorage {
        fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only").into())
        }

        fn remove_item(&self, _key: &str) -> Result<(), StorageError> {
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only").into())
        }
    }

    #[test]
    fn test_write_errors_are_returned() {
        let persistence = CartPersistence::new(Arc::new(ReadOnlyStorage), DEFAULT_CART_KEY);

        assert!(matches!(
            persistence.save(&[item("p1", 1000, 1)]),
            Err(StorageError::Io(_))
        ));
        assert!(matches!(persistence.clear(), Err(StorageError::Io(_))));
        assert!(persistence.load().is_empty());
    }

    #[test]
    fn test_keys_are_isolated() {
        let storage = Arc::new(MemoryStorage::new());
        let a = CartPersistence::new(storage.clone(), "cart_a");
        let b = CartPersistence::new(storage, "cart_b");

        a.save(&[item("p1", 1000, 1)]).unwrap();

        assert_eq!(a.load().len(), 1);
        assert!(b.load().is_empty());
    }
}
