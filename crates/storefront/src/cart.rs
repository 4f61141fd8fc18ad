//! The cart store.
//!
//! A reducer-driven mapping from product id to (product, quantity). Intents
//! arrive as [`CartAction`] values and are applied by an exhaustive pure
//! transition; the cached total is recomputed after every mutation so it can
//! never drift from the arithmetic sum of the lines.
//!
//! Cart state is session-lifetime only: it is deliberately not persisted.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use chap_core::{Price, ProductId};

use crate::models::Product;

/// South African VAT rate applied at checkout.
pub const VAT_RATE: Decimal = Decimal::from_parts(15, 0, 0, false, 2);

/// One (product, quantity) pair within the cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    pub product: Product,
    /// Always >= 1; a line whose quantity drops to zero is removed instead.
    pub quantity: u32,
}

impl CartLine {
    /// Price x quantity for this line.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price.times(self.quantity)
    }
}

/// Cart mutation intents.
#[derive(Debug, Clone)]
pub enum CartAction {
    /// Add a product. Merges into an existing line for the same product id.
    AddItem { product: Product, quantity: u32 },
    /// Set a line's quantity outright. Zero or negative removes the line;
    /// unknown ids are a no-op.
    UpdateQuantity { product_id: ProductId, quantity: i64 },
    /// Remove a line; no-op if absent.
    RemoveItem { product_id: ProductId },
    /// Empty the cart.
    Clear,
}

/// Derived order totals: subtotal, 15% VAT, free shipping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartSummary {
    pub subtotal: Price,
    pub vat: Price,
    pub shipping: Price,
    pub total: Price,
}

/// The in-memory cart.
///
/// Invariants: no two lines share a product id, and every quantity is >= 1.
#[derive(Debug, Clone, Default)]
pub struct CartStore {
    lines: Vec<CartLine>,
    total: Price,
}

impl CartStore {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a mutation intent.
    pub fn apply(&mut self, action: CartAction) {
        match action {
            CartAction::AddItem { product, quantity } => {
                if let Some(line) = self.lines.iter_mut().find(|l| l.product.id == product.id) {
                    line.quantity += quantity;
                } else {
                    self.lines.push(CartLine { product, quantity });
                }
            }
            CartAction::UpdateQuantity {
                product_id,
                quantity,
            } => {
                if quantity <= 0 {
                    self.lines.retain(|l| l.product.id != product_id);
                } else if let Some(line) =
                    self.lines.iter_mut().find(|l| l.product.id == product_id)
                {
                    line.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
                }
            }
            CartAction::RemoveItem { product_id } => {
                self.lines.retain(|l| l.product.id != product_id);
            }
            CartAction::Clear => self.lines.clear(),
        }
        self.total = self.compute_total();
    }

    /// Add one unit of a product.
    pub fn add_item(&mut self, product: &Product) {
        self.add_item_with_quantity(product, 1);
    }

    /// Add `quantity` units of a product.
    pub fn add_item_with_quantity(&mut self, product: &Product, quantity: u32) {
        self.apply(CartAction::AddItem {
            product: product.clone(),
            quantity,
        });
    }

    /// Set a line's quantity (not additive). Zero or negative removes it.
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: i64) {
        self.apply(CartAction::UpdateQuantity {
            product_id: product_id.clone(),
            quantity,
        });
    }

    /// Remove a line.
    pub fn remove_item(&mut self, product_id: &ProductId) {
        self.apply(CartAction::RemoveItem {
            product_id: product_id.clone(),
        });
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.apply(CartAction::Clear);
    }

    /// All lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The line for a product, if present.
    #[must_use]
    pub fn get(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.product.id == product_id)
    }

    /// Cached sum of price x quantity over all lines.
    #[must_use]
    pub const fn total(&self) -> Price {
        self.total
    }

    /// Sum of quantities across all lines (not the number of lines).
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Order totals with VAT and shipping applied.
    #[must_use]
    pub fn summary(&self) -> CartSummary {
        let subtotal = self.total;
        let vat = Price::new(subtotal.amount * VAT_RATE, subtotal.currency_code);
        let shipping = Price::zero();
        CartSummary {
            subtotal,
            vat,
            shipping,
            total: subtotal.plus(vat).plus(shipping),
        }
    }

    fn compute_total(&self) -> Price {
        self.lines
            .iter()
            .fold(Price::zero(), |acc, line| acc.plus(line.line_total()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chap_core::ProductId;

    fn product(id: &str, cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            description: String::new(),
            category: "Grocery".to_owned(),
            price: Price::from_cents(cents),
            original_price: None,
            rating: 4.0,
            review_count: 0,
            in_stock: true,
            image: String::new(),
            features: Vec::new(),
        }
    }

    /// The central invariant: the cached total always equals the arithmetic
    /// sum of price x quantity over the current lines.
    fn assert_total_invariant(cart: &CartStore) {
        let expected = cart
            .lines()
            .iter()
            .fold(Price::zero(), |acc, line| acc.plus(line.line_total()));
        assert_eq!(cart.total(), expected);
    }

    #[test]
    fn test_add_same_product_merges_lines() {
        let mut cart = CartStore::new();
        let p = product("1", 10000);
        cart.add_item(&p);
        cart.add_item(&p);

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.get(&p.id).unwrap().quantity, 2);
        assert_eq!(cart.item_count(), 2);
        assert_total_invariant(&cart);
    }

    #[test]
    fn test_update_quantity_sets_not_adds() {
        let mut cart = CartStore::new();
        let p = product("1", 5000);
        cart.add_item_with_quantity(&p, 3);
        cart.update_quantity(&p.id, 5);

        assert_eq!(cart.get(&p.id).unwrap().quantity, 5);
        assert_eq!(cart.total(), Price::from_cents(25000));
        assert_total_invariant(&cart);
    }

    #[test]
    fn test_update_quantity_zero_or_negative_removes_line() {
        for quantity in [0, -1] {
            let mut cart = CartStore::new();
            let p = product("1", 5000);
            cart.add_item(&p);
            cart.update_quantity(&p.id, quantity);

            assert!(cart.is_empty());
            assert_eq!(cart.item_count(), 0);
            assert_eq!(cart.total(), Price::zero());
        }
    }

    #[test]
    fn test_update_unknown_product_is_noop() {
        let mut cart = CartStore::new();
        cart.add_item(&product("1", 5000));
        cart.update_quantity(&ProductId::new("missing"), 7);

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.item_count(), 1);
        assert_total_invariant(&cart);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut cart = CartStore::new();
        let a = product("1", 5000);
        let b = product("2", 2000);
        cart.add_item(&a);
        cart.add_item(&b);

        cart.remove_item(&a.id);
        assert_eq!(cart.line_count(), 1);
        assert_total_invariant(&cart);

        // Removing an absent id is a no-op
        cart.remove_item(&a.id);
        assert_eq!(cart.line_count(), 1);

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Price::zero());
    }

    #[test]
    fn test_total_invariant_over_mutation_sequence() {
        let mut cart = CartStore::new();
        let a = product("1", 8999);
        let b = product("2", 1899);
        let c = product("3", 6499);

        cart.add_item_with_quantity(&a, 2);
        assert_total_invariant(&cart);
        cart.add_item(&b);
        assert_total_invariant(&cart);
        cart.add_item(&b);
        assert_total_invariant(&cart);
        cart.update_quantity(&a.id, 1);
        assert_total_invariant(&cart);
        cart.add_item_with_quantity(&c, 4);
        assert_total_invariant(&cart);
        cart.remove_item(&b.id);
        assert_total_invariant(&cart);
        cart.update_quantity(&c.id, 0);
        assert_total_invariant(&cart);

        // R89.99 x 1 remaining
        assert_eq!(cart.total(), Price::from_cents(8999));
    }

    #[test]
    fn test_out_of_stock_add_is_not_rejected() {
        // The in_stock flag gates the UI only; the store accepts the add.
        let mut cart = CartStore::new();
        let mut p = product("1", 5000);
        p.in_stock = false;
        cart.add_item(&p);
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_summary_applies_vat_and_free_shipping() {
        let mut cart = CartStore::new();
        cart.add_item(&product("1", 10000)); // R100.00

        let summary = cart.summary();
        assert_eq!(summary.subtotal, Price::from_cents(10000));
        assert_eq!(summary.vat, Price::from_cents(1500));
        assert_eq!(summary.shipping, Price::zero());
        assert_eq!(summary.total, Price::from_cents(11500));
    }
}
