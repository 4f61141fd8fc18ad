//! Domain models for the storefront.

pub mod product;
pub mod user;

pub use product::Product;
pub use user::{Address, Preferences, ProfileUpdate, RegisterData, User};
