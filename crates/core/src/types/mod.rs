//! Core types for Chap Cash & Carry.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod customer;
pub mod email;
pub mod id;
pub mod price;

pub use customer::{CustomerType, Language};
pub use email::{Email, EmailError};
pub use id::*;
pub use price::{CurrencyCode, Price};
