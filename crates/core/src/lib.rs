//! Tressa Core - Shared types library.
//!
//! This crate provides the types shared across the Tressa components:
//! - `cart` - Client-side cart store and its persistence adapter
//! - `cli` - Command-line tools for inspecting and editing a cart
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Product IDs, prices, and cart line items

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
