//! The static product catalog.
//!
//! The catalog is loaded once at startup and is read-only from every
//! consumer. The seed data ships embedded in the binary as JSON; deployments
//! can swap it out by loading a different JSON document at construction.

use std::collections::HashMap;

use chap_core::{Price, ProductId};

use crate::models::Product;

/// Seed catalog data embedded at compile time.
const SEED_CATALOG: &str = include_str!("../data/catalog.json");

/// Errors that can occur while loading the catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The catalog JSON could not be parsed.
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two products share the same identifier.
    #[error("duplicate product id: {0}")]
    DuplicateId(ProductId),
}

/// The static, ordered, read-only list of purchasable products.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    by_id: HashMap<ProductId, usize>,
}

impl Catalog {
    /// Build a catalog from an ordered product list.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateId`] if two products share an id.
    pub fn from_products(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut by_id = HashMap::with_capacity(products.len());
        for (index, product) in products.iter().enumerate() {
            if by_id.insert(product.id.clone(), index).is_some() {
                return Err(CatalogError::DuplicateId(product.id.clone()));
            }
        }
        tracing::info!(products = products.len(), "catalog loaded");
        Ok(Self { products, by_id })
    }

    /// Parse a catalog from a JSON document (an array of products).
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or contains duplicate ids.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::from_products(products)
    }

    /// Load the embedded seed catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded data is malformed; that indicates a
    /// packaging defect, not a runtime condition.
    pub fn load_default() -> Result<Self, CatalogError> {
        Self::from_json(SEED_CATALOG)
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.by_id.get(id).and_then(|&index| self.products.get(index))
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Distinct category labels in first-seen order.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for product in &self.products {
            if !seen.contains(&product.category.as_str()) {
                seen.push(product.category.as_str());
            }
        }
        seen
    }

    /// The highest product price, or zero for an empty catalog. Used as the
    /// upper bound for the price-range filter.
    #[must_use]
    pub fn max_price(&self) -> Price {
        self.products
            .iter()
            .map(|p| p.price)
            .max()
            .unwrap_or_else(Price::zero)
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
