//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `TRESSA_STORAGE_DIR` - Directory for file-backed storage (default: `.tressa`)
//! - `TRESSA_CART_KEY` - Storage key holding the cart (default: `tressa_cart`)
//! - `TRESSA_CURRENCY` - Display currency code (default: `USD`)

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;
use tressa_core::CurrencyCode;

use crate::persistence::{CartPersistence, DEFAULT_CART_KEY};
use crate::storage::{FileStorage, validate_key};
use crate::store::CartStore;

/// Default directory for file-backed storage.
pub const DEFAULT_STORAGE_DIR: &str = ".tressa";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    /// Directory holding the storage files
    pub storage_dir: PathBuf,
    /// Storage key the cart is persisted under
    pub cart_key: String,
    /// Currency used when formatting totals
    pub currency: CurrencyCode,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            cart_key: DEFAULT_CART_KEY.to_string(),
            currency: CurrencyCode::default(),
        }
    }
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let storage_dir = lookup("TRESSA_STORAGE_DIR")
            .map_or_else(|| PathBuf::from(DEFAULT_STORAGE_DIR), PathBuf::from);

        let cart_key = lookup("TRESSA_CART_KEY").unwrap_or_else(|| DEFAULT_CART_KEY.to_string());
        validate_key(&cart_key)
            .map_err(|e| ConfigError::InvalidEnvVar("TRESSA_CART_KEY".to_string(), e.to_string()))?;

        let currency = match lookup("TRESSA_CURRENCY") {
            Some(code) => code
                .parse::<CurrencyCode>()
                .map_err(|e| ConfigError::InvalidEnvVar("TRESSA_CURRENCY".to_string(), e))?,
            None => CurrencyCode::default(),
        };

        Ok(Self {
            storage_dir,
            cart_key,
            currency,
        })
    }

    /// Build a file-backed cart store from this configuration.
    #[must_use]
    pub fn open_store(&self) -> CartStore {
        let storage = Arc::new(FileStorage::new(&self.storage_dir));
        CartStore::new(CartPersistence::new(storage, self.cart_key.clone()))
    }
}
