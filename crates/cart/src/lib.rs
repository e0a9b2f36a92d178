//! Tressa Cart - Client-side shopping cart store.
//!
//! The cart is a list of [`LineItem`]s persisted under one fixed key of a
//! string key-value [`StorageArea`]. Every mutation reads the whole list,
//! applies the change, writes the whole list back, and once the write has
//! succeeded notifies subscribed listeners with the new list.
//!
//! # Architecture
//!
//! - [`storage`] - `StorageArea` trait with in-memory and JSON-file backends
//! - [`persistence`] - Loads/saves the line-item list under the cart key
//! - [`events`] - Change notification subject
//! - [`store`] - The cart store itself
//! - [`config`] - Environment configuration
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use rust_decimal::Decimal;
//! use tressa_cart::{CartPersistence, CartStore, MemoryStorage};
//! use tressa_core::{CartProduct, ProductId};
//!
//! let persistence = CartPersistence::new(Arc::new(MemoryStorage::new()), "tressa_cart");
//! let store = CartStore::new(persistence);
//!
//! let id = ProductId::parse("argan-serum").unwrap();
//! store.add(CartProduct::new(id, "Argan Serum", "", Decimal::new(2499, 2)), 2);
//!
//! assert_eq!(store.get_item_count(), 2);
//! assert_eq!(store.get_total(), Decimal::new(4998, 2));
//! ```
//!
//! # Concurrency
//!
//! Operations are synchronous and run to completion. Two stores sharing a
//! storage key (two tabs, two processes) are last-write-wins over the whole
//! list and can drop each other's changes.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod events;
pub mod persistence;
pub mod storage;
pub mod store;

pub use config::{CartConfig, ConfigError};
pub use events::{CartChange, CartEvents, ChangeKind, SubscriptionId};
pub use persistence::{CartPersistence, DEFAULT_CART_KEY};
pub use storage::{FileStorage, MemoryStorage, StorageArea, StorageError};
pub use store::{CartStore, CartSummary};

pub use tressa_core::{CartProduct, LineItem, ProductId};
