//! Product domain type.
//!
//! Products are immutable for the lifetime of the process; they are sourced
//! once from the static catalog and only ever read after that.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use chap_core::{Price, ProductId};

/// A purchasable product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Longer description shown on the detail view.
    pub description: String,
    /// Category label (e.g., "Grocery", "Household"). Compared exactly when
    /// filtering.
    pub category: String,
    /// Current selling price.
    pub price: Price,
    /// Pre-discount price, when the product is on promotion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Price>,
    /// Average customer rating, 0.0 to 5.0.
    pub rating: f32,
    /// Number of customer reviews behind the rating.
    pub review_count: u32,
    /// Whether the product is currently in stock. This flag gates the UI
    /// only; adding an out-of-stock product to the cart is not an error.
    pub in_stock: bool,
    /// Image URI.
    pub image: String,
    /// Marketing feature bullets, in display order.
    #[serde(default)]
    pub features: Vec<String>,
}

impl Product {
    /// Whether the product is on promotion.
    #[must_use]
    pub const fn has_discount(&self) -> bool {
        self.original_price.is_some()
    }

    /// Discount as a whole percentage of the original price, if any.
    #[must_use]
    pub fn discount_percent(&self) -> Option<u32> {
        let original = self.original_price?;
        if original.amount <= Decimal::ZERO {
            return None;
        }
        let fraction = (original.amount - self.price.amount) / original.amount;
        (fraction * Decimal::ONE_HUNDRED).round().to_u32()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product_with_prices(price_cents: i64, original_cents: Option<i64>) -> Product {
        Product {
            id: ProductId::new("1"),
            name: "Test Product".to_owned(),
            description: String::new(),
            category: "Grocery".to_owned(),
            price: Price::from_cents(price_cents),
            original_price: original_cents.map(Price::from_cents),
            rating: 4.0,
            review_count: 10,
            in_stock: true,
            image: "/images/test.jpg".to_owned(),
            features: Vec::new(),
        }
    }

    #[test]
    fn test_discount_percent() {
        let product = product_with_prices(8999, Some(10999));
        assert!(product.has_discount());
        assert_eq!(product.discount_percent(), Some(18));
    }

    #[test]
    fn test_no_discount() {
        let product = product_with_prices(8999, None);
        assert!(!product.has_discount());
        assert_eq!(product.discount_percent(), None);
    }
}
