//! Chap Cash & Carry storefront.
//!
//! The storefront for a South African cash-and-carry retailer: a seeded
//! product catalog with search, filtering, and sorting; a reducer-driven
//! cart; a mock authentication store with profile and wishlist management;
//! simulated checkout with injected payment failures; and a theme
//! preference. Session state that should outlive a run (the signed-in user,
//! the theme) is mirrored to a local key-value store.
//!
//! [`AppState`] assembles the pieces; the individual stores are usable on
//! their own.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod search;
pub mod state;
pub mod storage;
pub mod theme;

pub use error::{AppError, Result};
pub use state::AppState;
