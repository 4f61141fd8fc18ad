//! User domain types.
//!
//! The signed-in user is the session: held in memory by the auth store and
//! mirrored to local storage as a JSON blob on every mutation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use chap_core::{CustomerType, Email, Language, OrderId, ProductId, UserId};

/// A postal address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub province: String,
    pub postal_code: String,
}

/// Account preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Preferences {
    /// Preferred interface language.
    pub language: Language,
    /// Whether the customer opted into the newsletter.
    pub newsletter: bool,
}

/// A storefront user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<Preferences>,
    /// Loyalty point balance. Accrues on placed orders.
    pub loyalty_points: u32,
    /// Retail or wholesale pricing tier.
    pub customer_type: CustomerType,
    /// Product IDs saved for later. Membership is what matters; insertion
    /// order is preserved for display.
    pub wishlist: Vec<ProductId>,
    /// IDs of orders placed by this user, oldest first.
    pub order_history: Vec<OrderId>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Full display name.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Whether the wishlist contains the given product.
    #[must_use]
    pub fn wishlist_contains(&self, product_id: &ProductId) -> bool {
        self.wishlist.contains(product_id)
    }

    /// Shallow-merge an update into this user. Only fields present in the
    /// update are touched.
    pub fn apply_update(&mut self, update: ProfileUpdate) {
        if let Some(first_name) = update.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = update.last_name {
            self.last_name = last_name;
        }
        if let Some(phone) = update.phone {
            self.phone = Some(phone);
        }
        if let Some(address) = update.address {
            self.address = Some(address);
        }
        if let Some(preferences) = update.preferences {
            self.preferences = Some(preferences);
        }
    }
}

/// Registration form payload.
#[derive(Debug, Clone)]
pub struct RegisterData {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub customer_type: CustomerType,
}

/// A partial user update, applied as a shallow merge.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<Address>,
    pub preferences: Option<Preferences>,
}
