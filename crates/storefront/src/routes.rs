//! Route table and path parsing.
//!
//! Maps URL-style paths onto storefront pages. Parsing is total: an
//! unrecognized path yields [`Route::NotFound`] rather than an error.

use chap_core::ProductId;

/// A storefront page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Products,
    ProductDetail(ProductId),
    Cart,
    Checkout,
    Wishlist,
    Profile,
    About,
    Contact,
    NotFound,
}

impl Route {
    /// Parse a path into a route. Trailing slashes are tolerated; anything
    /// unrecognized becomes [`Route::NotFound`].
    #[must_use]
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" | "/" => Self::Home,
            "/products" => Self::Products,
            "/cart" => Self::Cart,
            "/checkout" => Self::Checkout,
            "/wishlist" => Self::Wishlist,
            "/profile" => Self::Profile,
            "/about" => Self::About,
            "/contact" => Self::Contact,
            _ => trimmed.strip_prefix("/products/").map_or(Self::NotFound, |id| {
                if id.is_empty() || id.contains('/') {
                    Self::NotFound
                } else {
                    Self::ProductDetail(ProductId::new(id))
                }
            }),
        }
    }

    /// The canonical path for this route.
    #[must_use]
    pub fn as_path(&self) -> String {
        match self {
            Self::Home => "/".to_owned(),
            Self::Products => "/products".to_owned(),
            Self::ProductDetail(id) => format!("/products/{id}"),
            Self::Cart => "/cart".to_owned(),
            Self::Checkout => "/checkout".to_owned(),
            Self::Wishlist => "/wishlist".to_owned(),
            Self::Profile => "/profile".to_owned(),
            Self::About => "/about".to_owned(),
            Self::Contact => "/contact".to_owned(),
            Self::NotFound => "/404".to_owned(),
        }
    }

    /// Whether the route requires a signed-in user.
    #[must_use]
    pub const fn requires_auth(&self) -> bool {
        matches!(self, Self::Profile | Self::Wishlist)
    }
}
