//! Catalog browsing commands.
//!
//! # Usage
//!
//! ```bash
//! chap catalog list --category Grocery --in-stock --sort price-low
//! chap catalog show 1
//! chap catalog categories
//! chap catalog suggest tea
//! ```

use rust_decimal::Decimal;

use chap_core::ProductId;
use chap_storefront::search::{SearchFilters, SortKey};
use chap_storefront::AppState;

/// Filter flags collected from the command line.
#[derive(Debug)]
pub struct ListOptions {
    pub query: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub min_rating: Option<f32>,
    pub in_stock: bool,
    pub sort: String,
}

impl ListOptions {
    fn to_filters(&self) -> SearchFilters {
        let defaults = SearchFilters::default();
        SearchFilters {
            query: self.query.clone().unwrap_or_default(),
            category: self.category.clone().unwrap_or_default(),
            price_range: (
                self.min_price.unwrap_or(defaults.price_range.0),
                self.max_price.unwrap_or(defaults.price_range.1),
            ),
            min_rating: self.min_rating.unwrap_or(defaults.min_rating),
            in_stock_only: self.in_stock,
            sort: SortKey::parse(&self.sort),
        }
    }
}

/// List products matching the given filters.
#[allow(clippy::print_stdout)]
pub fn list(state: &AppState, options: &ListOptions) {
    let filters = options.to_filters();
    let results = state.search(&filters);

    if results.is_empty() {
        println!("No products match.");
        return;
    }

    for product in &results {
        let stock = if product.in_stock { "" } else { "  [out of stock]" };
        println!(
            "{:>4}  {:<30} {:<15} {:>9}  {:.1}★ ({}){stock}",
            product.id,
            product.name,
            product.category,
            product.price.to_string(),
            product.rating,
            product.review_count,
        );
    }
    println!("\n{} product(s)", results.len());
}

/// Show one product in full.
///
/// # Errors
///
/// Returns an error for an unknown product id.
#[allow(clippy::print_stdout)]
pub fn show(state: &AppState, id: &str) -> Result<(), chap_storefront::AppError> {
    let product = state.product(&ProductId::new(id))?;

    println!("{} ({})", product.name, product.id);
    println!("  Category:  {}", product.category);
    match (product.original_price, product.discount_percent()) {
        (Some(original), Some(percent)) => {
            println!("  Price:     {} (was {original}, save {percent}%)", product.price);
        }
        _ => println!("  Price:     {}", product.price),
    }
    println!("  Rating:    {:.1} ({} reviews)", product.rating, product.review_count);
    println!(
        "  Stock:     {}",
        if product.in_stock { "in stock" } else { "out of stock" }
    );
    println!("  {}", product.description);
    for feature in &product.features {
        println!("  - {feature}");
    }
    Ok(())
}

/// List the catalog's categories in first-seen order.
#[allow(clippy::print_stdout)]
pub fn categories(state: &AppState) {
    for category in state.catalog().categories() {
        println!("{category}");
    }
}

/// Show search suggestions for a partial query.
#[allow(clippy::print_stdout)]
pub fn suggest(state: &AppState, query: &str) {
    let suggestions = state.suggestions(query);
    if suggestions.is_empty() {
        println!("No suggestions.");
        return;
    }
    for name in suggestions {
        println!("{name}");
    }
}
