//! Integration tests for the Chap Cash & Carry storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p chap-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `shopping_flow` - Browse, cart, and checkout flows
//! - `session_persistence` - Persisted session behavior across restarts
//! - `checkout_failures` - Validation and injected payment failures
//!
//! Everything runs against the simulated backend with zero delay and
//! storage in a per-test temporary directory, so the suite needs no
//! external services.

use tempfile::TempDir;

use chap_storefront::config::StorefrontConfig;
use chap_storefront::AppState;

/// A storefront wired to a throwaway data directory.
///
/// The directory lives as long as the context, so a test can rebuild the
/// [`AppState`] over the same storage to simulate a restart.
pub struct TestContext {
    pub state: AppState,
    data_dir: TempDir,
}

impl TestContext {
    /// Build a storefront with deterministic test configuration: zero
    /// simulated delay and no injected payment failures.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory or storefront cannot be created;
    /// test-setup failures should be loud.
    #[allow(clippy::unwrap_used)]
    #[must_use]
    pub fn new() -> Self {
        let data_dir = TempDir::new().unwrap();
        let state = AppState::new(StorefrontConfig::for_tests(data_dir.path())).unwrap();
        Self { state, data_dir }
    }

    /// Build a storefront with every simulated card payment declined.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory or storefront cannot be created.
    #[allow(clippy::unwrap_used)]
    #[must_use]
    pub fn with_all_payments_declined() -> Self {
        let data_dir = TempDir::new().unwrap();
        let config = StorefrontConfig {
            payment_failure_rate: 1.0,
            ..StorefrontConfig::for_tests(data_dir.path())
        };
        let state = AppState::new(config).unwrap();
        Self { state, data_dir }
    }

    /// Rebuild the storefront over the same data directory, as a restart
    /// would.
    ///
    /// # Panics
    ///
    /// Panics if the storefront cannot be rebuilt.
    #[allow(clippy::unwrap_used)]
    pub fn restart(&mut self) {
        self.state = AppState::new(StorefrontConfig::for_tests(self.data_dir.path())).unwrap();
    }

    /// Path to the storage directory backing this context.
    #[must_use]
    pub fn data_dir(&self) -> &std::path::Path {
        self.data_dir.path()
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
