//! Application state: the stores, the catalog, and the operations that
//! span them.
//!
//! `AppState` owns one of each store and wires them to a single shared local
//! key-value store. Cross-store flows live here: checkout clears the cart
//! and credits loyalty points, navigation invalidates in-flight auth
//! requests.

use chap_core::ProductId;

use crate::auth::AuthStore;
use crate::cart::CartStore;
use crate::catalog::Catalog;
use crate::checkout::{CheckoutDetails, CheckoutService, PaymentMethod, PlacedOrder};
use crate::config::StorefrontConfig;
use crate::error::{AppError, Result};
use crate::models::user::RegisterData;
use crate::models::Product;
use crate::routes::Route;
use crate::search::{self, SearchFilters};
use crate::storage::{LocalStore, SharedStore};
use crate::theme::ThemeStore;

/// The assembled storefront.
pub struct AppState {
    config: StorefrontConfig,
    catalog: Catalog,
    storage: SharedStore,
    cart: CartStore,
    auth: AuthStore,
    theme: ThemeStore,
}

impl AppState {
    /// Build the storefront: open local storage, hydrate the persisted
    /// stores, and load the seed catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be opened or the seed catalog is
    /// malformed.
    pub fn new(config: StorefrontConfig) -> Result<Self> {
        let storage = LocalStore::open(&config.data_dir)
            .map_err(AppError::Storage)?
            .into_shared();
        let catalog = Catalog::load_default()?;
        let auth = AuthStore::hydrate(storage.clone())?;
        let theme = ThemeStore::hydrate(storage.clone()).map_err(AppError::Storage)?;

        tracing::info!(
            products = catalog.len(),
            data_dir = %config.data_dir.display(),
            "storefront ready"
        );

        Ok(Self {
            config,
            catalog,
            storage,
            cart: CartStore::new(),
            auth,
            theme,
        })
    }

    /// The loaded configuration.
    #[must_use]
    pub const fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    /// The product catalog.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The shared local key-value store.
    #[must_use]
    pub const fn storage(&self) -> &SharedStore {
        &self.storage
    }

    /// The cart store.
    #[must_use]
    pub const fn cart(&self) -> &CartStore {
        &self.cart
    }

    /// Mutable cart access for dispatching cart intents.
    pub const fn cart_mut(&mut self) -> &mut CartStore {
        &mut self.cart
    }

    /// The auth store.
    #[must_use]
    pub const fn auth(&self) -> &AuthStore {
        &self.auth
    }

    /// Mutable auth access for dispatching auth intents.
    pub const fn auth_mut(&mut self) -> &mut AuthStore {
        &mut self.auth
    }

    /// The theme store.
    #[must_use]
    pub const fn theme(&self) -> &ThemeStore {
        &self.theme
    }

    /// Mutable theme access for toggling.
    pub const fn theme_mut(&mut self) -> &mut ThemeStore {
        &mut self.theme
    }

    /// Filter and sort the catalog.
    #[must_use]
    pub fn search(&self, filters: &SearchFilters) -> Vec<&Product> {
        search::search(&self.catalog, filters)
    }

    /// Search suggestions for a partial query.
    #[must_use]
    pub fn suggestions(&self, query: &str) -> Vec<String> {
        search::suggestions(&self.catalog, query)
    }

    /// Look up a product, as an application-level result.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for unknown ids.
    pub fn product(&self, id: &ProductId) -> Result<&Product> {
        self.catalog
            .get(id)
            .ok_or_else(|| AppError::NotFound(format!("product {id}")))
    }

    /// Simulated login using the configured delay.
    ///
    /// Returns true if the user is signed in afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be persisted.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<bool> {
        let delay = self.config.sim_delay;
        Ok(self.auth.login(email, password, delay).await?)
    }

    /// Simulated registration using the configured delay.
    ///
    /// Returns true if the user is signed in afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be persisted.
    pub async fn register(&mut self, data: RegisterData) -> Result<bool> {
        let delay = self.config.sim_delay;
        Ok(self.auth.register(data, delay).await?)
    }

    /// Submit the current cart as an order.
    ///
    /// On success the cart is cleared and, if a user is signed in, the order
    /// id and earned loyalty points are recorded against them. A rejected
    /// submission (including a declined payment) leaves the cart untouched.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Checkout`] for a rejected submission, or a
    /// storage error if recording the order against the user fails.
    pub async fn checkout(
        &mut self,
        details: &CheckoutDetails,
        payment: &PaymentMethod,
    ) -> Result<PlacedOrder> {
        let service = CheckoutService::new(self.config.sim_delay, self.config.payment_failure_rate);
        let order = service.place_order(&self.cart, details, payment).await?;

        if self.auth.is_authenticated() {
            self.auth.dispatch(crate::auth::AuthAction::RecordOrder {
                order_id: order.order_id.clone(),
                loyalty_points: order.loyalty_points(),
            })?;
        }
        self.cart.clear();

        Ok(order)
    }

    /// Resolve a path to a route, invalidating any in-flight auth request
    /// first so a late completion cannot land on the new page.
    pub fn navigate(&mut self, path: &str) -> Route {
        self.auth.invalidate_pending();
        Route::parse(path)
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("products", &self.catalog.len())
            .field("cart_lines", &self.cart.line_count())
            .field("authenticated", &self.auth.is_authenticated())
            .field("theme", &self.theme.theme())
            .finish_non_exhaustive()
    }
}
