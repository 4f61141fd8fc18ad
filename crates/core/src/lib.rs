//! Chap Core - Shared types library.
//!
//! This crate provides common types used across all Chap Cash & Carry
//! components:
//! - `storefront` - Storefront domain logic (catalog, cart, auth, checkout)
//! - `cli` - Command-line tools for browsing the catalog and managing sessions
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no async
//! code. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, and
//!   customer classifications

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
