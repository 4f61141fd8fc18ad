//! Type-safe price representation using decimal arithmetic.
//!
//! All storefront prices are South African Rand. Amounts are kept as
//! [`Decimal`] values in the currency's standard unit (rands, not cents) so
//! that cart totals never accumulate floating-point drift.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., rands, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// A ZAR price from an amount in rands.
    #[must_use]
    pub const fn zar(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::ZAR)
    }

    /// A ZAR price from an amount in cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self::zar(Decimal::new(cents, 2))
    }

    /// The zero price.
    #[must_use]
    pub const fn zero() -> Self {
        Self::zar(Decimal::ZERO)
    }

    /// This price multiplied by a quantity (a cart line total).
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self::new(self.amount * Decimal::from(quantity), self.currency_code)
    }

    /// The sum of this price and another.
    ///
    /// All storefront prices share a single currency, so no conversion is
    /// attempted.
    #[must_use]
    pub fn plus(&self, other: Self) -> Self {
        Self::new(self.amount + other.amount, self.currency_code)
    }
}

impl Default for Price {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:.2}", self.currency_code.symbol(), self.amount)
    }
}

/// ISO 4217 currency codes.
///
/// The storefront trades exclusively in South African Rand; the enum exists
/// so prices carry their currency explicitly rather than by convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    ZAR,
}

impl CurrencyCode {
    /// Display symbol (e.g., "R" for ZAR).
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::ZAR => "R",
        }
    }

    /// ISO 4217 code string.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ZAR => "ZAR",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let price = Price::from_cents(12999);
        assert_eq!(price.amount, Decimal::new(12999, 2));
        assert_eq!(price.currency_code, CurrencyCode::ZAR);
    }

    #[test]
    fn test_display() {
        assert_eq!(Price::from_cents(12999).to_string(), "R129.99");
        assert_eq!(Price::zero().to_string(), "R0.00");
    }

    #[test]
    fn test_times_and_plus() {
        let price = Price::from_cents(2550);
        assert_eq!(price.times(3), Price::from_cents(7650));
        assert_eq!(
            price.plus(Price::from_cents(50)),
            Price::from_cents(2600)
        );
    }

    #[test]
    fn test_serde_amount_as_string() {
        // serde-with-str serializes Decimal amounts as strings
        let json = serde_json::to_string(&Price::from_cents(12999)).unwrap();
        assert_eq!(json, r#"{"amount":"129.99","currency_code":"ZAR"}"#);
        let parsed: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Price::from_cents(12999));
    }
}
