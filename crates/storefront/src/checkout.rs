//! Checkout submission and simulated payment processing.
//!
//! Validation runs before submission and blocks progression; the payment
//! step is a simulation with an injected failure rate. A declined payment
//! never corrupts the cart - the caller keeps its state and may retry.

use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::Rng;
use rust_decimal::prelude::ToPrimitive;
use thiserror::Error;
use uuid::Uuid;

use chap_core::{OrderId, Price};

use crate::cart::{CartStore, CartSummary};
use crate::models::user::Address;

/// Minimum number of digits in an accepted card number.
const MIN_CARD_DIGITS: usize = 16;

/// Errors that reject a checkout submission. All of them are retryable.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The cart has no lines to order.
    #[error("cart is empty")]
    EmptyCart,

    /// Required customer fields are missing.
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// One or more card fields are blank.
    #[error("please complete all card details")]
    IncompleteCard,

    /// The card number has too few digits.
    #[error("invalid card number")]
    InvalidCardNumber,

    /// The simulated payment processor declined the charge.
    #[error("payment declined, please try again or use a different payment method")]
    PaymentDeclined,
}

/// Customer details collected by the checkout form.
#[derive(Debug, Clone, Default)]
pub struct CheckoutDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: Address,
}

impl CheckoutDetails {
    /// Check that every required field is filled in.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::MissingFields`] naming each blank field.
    pub fn validate(&self) -> Result<(), CheckoutError> {
        let mut missing = Vec::new();
        let required: [(&'static str, &str); 8] = [
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("street", &self.address.street),
            ("city", &self.address.city),
            ("province", &self.address.province),
            ("postal_code", &self.address.postal_code),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                missing.push(name);
            }
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(CheckoutError::MissingFields(missing))
        }
    }
}

/// Card form fields.
#[derive(Debug, Clone, Default)]
pub struct CardDetails {
    pub card_number: String,
    pub expiry_date: String,
    pub cvv: String,
    pub cardholder_name: String,
}

impl CardDetails {
    /// Validate the card fields: all present, number at least 16 digits
    /// once spaces are stripped.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::IncompleteCard`] or
    /// [`CheckoutError::InvalidCardNumber`].
    pub fn validate(&self) -> Result<(), CheckoutError> {
        if self.card_number.is_empty()
            || self.expiry_date.is_empty()
            || self.cvv.is_empty()
            || self.cardholder_name.is_empty()
        {
            return Err(CheckoutError::IncompleteCard);
        }
        let digits = self.card_number.chars().filter(char::is_ascii_digit).count();
        if digits < MIN_CARD_DIGITS {
            return Err(CheckoutError::InvalidCardNumber);
        }
        Ok(())
    }
}

/// How the customer pays.
///
/// Only card payments are validated and subject to the injected failure;
/// EFT and cash on collection settle outside the storefront.
#[derive(Debug, Clone)]
pub enum PaymentMethod {
    Card(CardDetails),
    Eft,
    CashOnCollection,
}

/// A successfully placed order.
#[derive(Debug, Clone)]
pub struct PlacedOrder {
    pub order_id: OrderId,
    pub subtotal: Price,
    pub vat: Price,
    pub total: Price,
    pub placed_at: DateTime<Utc>,
}

impl PlacedOrder {
    /// Loyalty points earned: one point per whole rand of the order total.
    #[must_use]
    pub fn loyalty_points(&self) -> u32 {
        self.total.amount.trunc().to_u32().unwrap_or(0)
    }
}

/// The simulated checkout processor.
#[derive(Debug, Clone)]
pub struct CheckoutService {
    delay: Duration,
    failure_rate: f64,
}

impl CheckoutService {
    /// Create a processor with the given simulated delay and injected card
    /// failure probability.
    #[must_use]
    pub const fn new(delay: Duration, failure_rate: f64) -> Self {
        Self {
            delay,
            failure_rate,
        }
    }

    /// Submit an order.
    ///
    /// Validates details and payment up front, waits out the simulated
    /// processing delay, then rolls the injected failure for card payments.
    /// The cart is read, never mutated - clearing it on success is the
    /// caller's decision.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckoutError`]; every variant leaves the cart intact and
    /// the checkout retryable.
    pub async fn place_order(
        &self,
        cart: &CartStore,
        details: &CheckoutDetails,
        payment: &PaymentMethod,
    ) -> Result<PlacedOrder, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        details.validate()?;
        if let PaymentMethod::Card(card) = payment {
            card.validate()?;
        }

        tokio::time::sleep(self.delay).await;

        if matches!(payment, PaymentMethod::Card(_)) && self.roll_failure() {
            tracing::warn!("simulated payment declined");
            return Err(CheckoutError::PaymentDeclined);
        }

        let CartSummary { subtotal, vat, total, .. } = cart.summary();
        let order = PlacedOrder {
            order_id: OrderId::new(Uuid::new_v4().to_string()),
            subtotal,
            vat,
            total,
            placed_at: Utc::now(),
        };
        tracing::info!(order_id = %order.order_id, total = %order.total, "order placed");
        Ok(order)
    }

    fn roll_failure(&self) -> bool {
        if self.failure_rate <= 0.0 {
            return false;
        }
        rand::rng().random::<f64>() < self.failure_rate
    }
}
