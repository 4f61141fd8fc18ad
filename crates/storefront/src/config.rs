//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional and have defaults:
//! - `CHAP_DATA_DIR` - Directory for the local key-value store (default: `.chap`)
//! - `CHAP_SIM_DELAY_MS` - Simulated network delay in milliseconds applied to
//!   login, registration, and payment processing (default: 1000)
//! - `CHAP_PAYMENT_FAILURE_RATE` - Probability in [0, 1] that a simulated
//!   card payment is declined (default: 0.1)

use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("{0} must be between 0.0 and 1.0 (got {1})")]
    RateOutOfRange(String, f64),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Directory holding the local key-value store.
    pub data_dir: PathBuf,
    /// Simulated network delay for mock "API calls".
    pub sim_delay: Duration,
    /// Injected card payment failure probability, within [0, 1].
    pub payment_failure_rate: f64,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but unparseable or out
    /// of range.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let data_dir = PathBuf::from(get_env_or_default("CHAP_DATA_DIR", ".chap"));

        let delay_ms = get_env_or_default("CHAP_SIM_DELAY_MS", "1000")
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("CHAP_SIM_DELAY_MS".to_owned(), e.to_string())
            })?;

        let payment_failure_rate = get_env_or_default("CHAP_PAYMENT_FAILURE_RATE", "0.1")
            .parse::<f64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("CHAP_PAYMENT_FAILURE_RATE".to_owned(), e.to_string())
            })?;
        if !(0.0..=1.0).contains(&payment_failure_rate) {
            return Err(ConfigError::RateOutOfRange(
                "CHAP_PAYMENT_FAILURE_RATE".to_owned(),
                payment_failure_rate,
            ));
        }

        Ok(Self {
            data_dir,
            sim_delay: Duration::from_millis(delay_ms),
            payment_failure_rate,
        })
    }

    /// A deterministic configuration for tests and demos: zero delay, no
    /// injected payment failures, storage under the given directory.
    #[must_use]
    pub fn for_tests(data_dir: &Path) -> Self {
        Self {
            data_dir: data_dir.to_path_buf(),
            sim_delay: Duration::ZERO,
            payment_failure_rate: 0.0,
        }
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}
