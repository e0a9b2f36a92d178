//! Core types for Tressa.
//!
//! This module provides type-safe wrappers for the cart's domain concepts.

pub mod id;
pub mod line_item;
pub mod price;

pub use id::{ProductId, ProductIdError};
pub use line_item::{CartProduct, LineItem};
pub use price::{CurrencyCode, Price};
