//! Product search, filtering, and sorting.
//!
//! The engine is a pure function of (catalog, filters): it is recomputed
//! synchronously whenever criteria change and has no failure mode - a query
//! with no matches yields an empty list, never an error.

use rust_decimal::Decimal;

use crate::catalog::Catalog;
use crate::models::Product;

/// Maximum number of search suggestions returned.
const MAX_SUGGESTIONS: usize = 5;

/// Sort order for filtered results.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Name, lexicographic ascending.
    #[default]
    Name,
    /// Price ascending.
    PriceLow,
    /// Price descending.
    PriceHigh,
    /// Rating descending.
    Rating,
    /// Identifier descending, lexicographically. A stand-in heuristic for
    /// recency; the catalog has no creation timestamp.
    Newest,
}

impl SortKey {
    /// Parse from a URL/CLI parameter value. Unknown values fall back to
    /// name order.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "price-low" => Self::PriceLow,
            "price-high" => Self::PriceHigh,
            "rating" => Self::Rating,
            "newest" => Self::Newest,
            _ => Self::Name,
        }
    }

    /// Parameter value for this sort order.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::PriceLow => "price-low",
            Self::PriceHigh => "price-high",
            Self::Rating => "rating",
            Self::Newest => "newest",
        }
    }
}

/// Search and filter criteria. Pure configuration; nothing here persists.
#[derive(Debug, Clone)]
pub struct SearchFilters {
    /// Free-text query, matched case-insensitively against name,
    /// description, and category.
    pub query: String,
    /// Category filter; empty means all categories. Matched exactly
    /// (case-sensitive) when set.
    pub category: String,
    /// Inclusive price range in rands.
    pub price_range: (Decimal, Decimal),
    /// Minimum rating threshold.
    pub min_rating: f32,
    /// When true, only in-stock products match.
    pub in_stock_only: bool,
    /// Sort order applied to the matching set.
    pub sort: SortKey,
}

impl Default for SearchFilters {
    fn default() -> Self {
        Self {
            query: String::new(),
            category: String::new(),
            price_range: (Decimal::ZERO, Decimal::MAX),
            min_rating: 0.0,
            in_stock_only: false,
            sort: SortKey::Name,
        }
    }
}

impl SearchFilters {
    /// Whether any non-default criterion is active (drives the "clear
    /// filters" affordance).
    #[must_use]
    pub fn has_active_filters(&self) -> bool {
        !self.category.is_empty()
            || self.price_range.0 > Decimal::ZERO
            || self.price_range.1 < Decimal::MAX
            || self.min_rating > 0.0
            || self.in_stock_only
            || self.sort != SortKey::Name
    }
}

/// Filter and sort the catalog.
///
/// A product matches when ALL criteria hold; ties under the sort key retain
/// catalog order (stable sort).
#[must_use]
pub fn search<'a>(catalog: &'a Catalog, filters: &SearchFilters) -> Vec<&'a Product> {
    let mut matched: Vec<&Product> = catalog
        .products()
        .iter()
        .filter(|product| matches(product, filters))
        .collect();

    match filters.sort {
        SortKey::Name => matched.sort_by(|a, b| a.name.cmp(&b.name)),
        SortKey::PriceLow => matched.sort_by(|a, b| a.price.amount.cmp(&b.price.amount)),
        SortKey::PriceHigh => matched.sort_by(|a, b| b.price.amount.cmp(&a.price.amount)),
        SortKey::Rating => matched.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        SortKey::Newest => matched.sort_by(|a, b| b.id.as_str().cmp(a.id.as_str())),
    }

    matched
}

fn matches(product: &Product, filters: &SearchFilters) -> bool {
    let matches_query = filters.query.is_empty() || {
        let query = filters.query.to_lowercase();
        product.name.to_lowercase().contains(&query)
            || product.description.to_lowercase().contains(&query)
            || product.category.to_lowercase().contains(&query)
    };

    let matches_category =
        filters.category.is_empty() || product.category == filters.category;

    let (min_price, max_price) = filters.price_range;
    let matches_price = product.price.amount >= min_price && product.price.amount <= max_price;

    let matches_rating = product.rating >= filters.min_rating;

    let matches_stock = !filters.in_stock_only || product.in_stock;

    matches_query && matches_category && matches_price && matches_rating && matches_stock
}

/// Lowercase product names containing the lowercase query, up to 5.
///
/// Presentation assist only - not part of the filtering contract. Queries of
/// a single character or less yield nothing.
#[must_use]
pub fn suggestions(catalog: &Catalog, query: &str) -> Vec<String> {
    if query.chars().count() <= 1 {
        return Vec::new();
    }
    let query = query.to_lowercase();
    catalog
        .products()
        .iter()
        .map(|product| product.name.to_lowercase())
        .filter(|name| name.contains(&query))
        .take(MAX_SUGGESTIONS)
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chap_core::{Price, ProductId};

    fn product(id: &str, name: &str, category: &str, cents: i64, rating: f32, in_stock: bool) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_owned(),
            description: format!("{name} description"),
            category: category.to_owned(),
            price: Price::from_cents(cents),
            original_price: None,
            rating,
            review_count: 10,
            in_stock,
            image: String::new(),
            features: Vec::new(),
        }
    }

    /// The two-product scenario from the design notes: A (R100, Grocery,
    /// 4.5, in stock) and B (R50, Household, 3.0, out of stock).
    fn two_product_catalog() -> Catalog {
        Catalog::from_products(vec![
            product("1", "A", "Grocery", 10000, 4.5, true),
            product("2", "B", "Household", 5000, 3.0, false),
        ])
        .unwrap()
    }

    #[test]
    fn test_default_filters_return_full_catalog_name_ascending() {
        let catalog = Catalog::from_products(vec![
            product("1", "Zebra Biscuits", "Snacks", 1000, 4.0, true),
            product("2", "Apple Juice", "Beverages", 2000, 4.0, true),
        ])
        .unwrap();

        let results = search(&catalog, &SearchFilters::default());
        let names: Vec<&str> = results.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Apple Juice", "Zebra Biscuits"]);
    }

    #[test]
    fn test_query_matches_name_description_category() {
        let catalog = two_product_catalog();
        let mut filters = SearchFilters::default();

        filters.query = "a".to_owned();
        assert_eq!(search(&catalog, &filters).len(), 1);

        // Category substring, case-insensitive
        filters.query = "houseHOLD".to_owned();
        let results = search(&catalog, &filters);
        assert_eq!(results.len(), 1);
        assert_eq!(results.first().unwrap().name, "B");
    }

    #[test]
    fn test_category_filter_is_exact_and_case_sensitive() {
        let catalog = two_product_catalog();
        let mut filters = SearchFilters::default();

        filters.category = "Household".to_owned();
        let results = search(&catalog, &filters);
        assert_eq!(results.len(), 1);
        assert_eq!(results.first().unwrap().name, "B");

        filters.category = "household".to_owned();
        assert!(search(&catalog, &filters).is_empty());
    }

    #[test]
    fn test_in_stock_only() {
        let catalog = two_product_catalog();
        let filters = SearchFilters {
            in_stock_only: true,
            ..SearchFilters::default()
        };
        let results = search(&catalog, &filters);
        assert_eq!(results.len(), 1);
        assert_eq!(results.first().unwrap().name, "A");
    }

    #[test]
    fn test_min_rating() {
        let catalog = two_product_catalog();
        let filters = SearchFilters {
            min_rating: 4.0,
            ..SearchFilters::default()
        };
        let results = search(&catalog, &filters);
        assert_eq!(results.len(), 1);
        assert_eq!(results.first().unwrap().name, "A");
    }

    #[test]
    fn test_price_range_is_inclusive() {
        let catalog = two_product_catalog();
        let filters = SearchFilters {
            price_range: (Decimal::new(5000, 2), Decimal::new(10000, 2)),
            ..SearchFilters::default()
        };
        // Both boundary prices (R50 and R100) match
        assert_eq!(search(&catalog, &filters).len(), 2);
    }

    #[test]
    fn test_price_sorts_are_reversed() {
        let catalog = two_product_catalog();

        let low = SearchFilters {
            sort: SortKey::PriceLow,
            ..SearchFilters::default()
        };
        let low_names: Vec<&str> = search(&catalog, &low).iter().map(|p| p.name.as_str()).collect();
        assert_eq!(low_names, vec!["B", "A"]);

        let high = SearchFilters {
            sort: SortKey::PriceHigh,
            ..SearchFilters::default()
        };
        let high_names: Vec<&str> = search(&catalog, &high).iter().map(|p| p.name.as_str()).collect();
        assert_eq!(high_names, vec!["A", "B"]);
    }

    #[test]
    fn test_equal_sort_keys_retain_catalog_order() {
        let catalog = Catalog::from_products(vec![
            product("1", "First", "Grocery", 1000, 4.0, true),
            product("2", "Second", "Grocery", 1000, 4.0, true),
        ])
        .unwrap();
        let filters = SearchFilters {
            sort: SortKey::PriceLow,
            ..SearchFilters::default()
        };
        let names: Vec<&str> = search(&catalog, &filters).iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second"]);
    }

    #[test]
    fn test_newest_sorts_by_id_descending() {
        let catalog = two_product_catalog();
        let filters = SearchFilters {
            sort: SortKey::Newest,
            ..SearchFilters::default()
        };
        let ids: Vec<&str> = search(&catalog, &filters).iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1"]);
    }

    #[test]
    fn test_no_matches_is_empty_not_error() {
        let catalog = two_product_catalog();
        let filters = SearchFilters {
            query: "xyzzy".to_owned(),
            ..SearchFilters::default()
        };
        assert!(search(&catalog, &filters).is_empty());
    }

    #[test]
    fn test_suggestions() {
        let catalog = Catalog::load_default().unwrap();

        // Single character: no suggestions
        assert!(suggestions(&catalog, "t").is_empty());

        let tea = suggestions(&catalog, "tea");
        assert!(!tea.is_empty());
        assert!(tea.len() <= 5);
        assert!(tea.iter().all(|name| name.contains("tea")));
        // Suggestions are lowercased product names
        assert!(tea.iter().all(|name| name == &name.to_lowercase()));
    }

    #[test]
    fn test_sort_key_parse_roundtrip() {
        for key in [SortKey::Name, SortKey::PriceLow, SortKey::PriceHigh, SortKey::Rating, SortKey::Newest] {
            assert_eq!(SortKey::parse(key.as_str()), key);
        }
        assert_eq!(SortKey::parse("garbage"), SortKey::Name);
    }
}
