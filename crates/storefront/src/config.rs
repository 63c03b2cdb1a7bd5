//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `PLANTOMART_STORAGE_DIR` - Directory for the file-backed origin (default: .plantomart)
//! - `PLANTOMART_CART_KEY` - Storage key for the cart (default: plantomartCart)
//! - `PLANTOMART_WISHLIST_KEY` - Storage key for the wishlist (default: plantomartWishlist)
//! - `PLANTOMART_BADGE_CAP` - Counts above this render as "N+" (default: 5)
//! - `PLANTOMART_CURRENCY` - ISO currency for subtotals (default: INR)
//! - `PLANTOMART_EVENT_CAPACITY` - Per-channel notification buffer (default: 64)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::path::PathBuf;

use plantomart_core::{BADGE_CAP, CurrencyCode};
use thiserror::Error;

use crate::store::ListKind;

/// Default storage key for the cart list.
pub const DEFAULT_CART_KEY: &str = "plantomartCart";
/// Default storage key for the wishlist.
pub const DEFAULT_WISHLIST_KEY: &str = "plantomartWishlist";
/// Default notification channel capacity.
///
/// Lagging receivers resync from the store, so this only bounds memory.
pub const DEFAULT_EVENT_CAPACITY: usize = 64;

const DEFAULT_STORAGE_DIR: &str = ".plantomart";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Directory holding one JSON file per storage key
    pub storage_dir: PathBuf,
    /// Storage key names for each list kind
    pub keys: StorageKeys,
    /// Counts above this are shown as "N+"
    pub badge_cap: usize,
    /// Currency used to format subtotals
    pub currency: CurrencyCode,
    /// Buffer size of each notification channel
    pub event_capacity: usize,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Storage key names. Other pages read the same keys, so they must agree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    pub cart: String,
    pub wishlist: String,
}

impl StorageKeys {
    /// Key for a list kind.
    #[must_use]
    pub fn key(&self, kind: ListKind) -> &str {
        match kind {
            ListKind::Cart => &self.cart,
            ListKind::Wishlist => &self.wishlist,
        }
    }

    /// The list kind stored under `key`, if any.
    #[must_use]
    pub fn kind_of(&self, key: &str) -> Option<ListKind> {
        if key == self.cart {
            Some(ListKind::Cart)
        } else if key == self.wishlist {
            Some(ListKind::Wishlist)
        } else {
            None
        }
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            cart: ListKind::Cart.storage_key().to_string(),
            wishlist: ListKind::Wishlist.storage_key().to_string(),
        }
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            keys: StorageKeys::default(),
            badge_cap: BADGE_CAP,
            currency: CurrencyCode::default(),
            event_capacity: DEFAULT_EVENT_CAPACITY,
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let env = Lookup(lookup);

        let storage_dir = env
            .get("PLANTOMART_STORAGE_DIR")
            .map_or(defaults.storage_dir, PathBuf::from);

        let cart = env.get_or("PLANTOMART_CART_KEY", DEFAULT_CART_KEY);
        validate_key(&cart, "PLANTOMART_CART_KEY")?;
        let wishlist = env.get_or("PLANTOMART_WISHLIST_KEY", DEFAULT_WISHLIST_KEY);
        validate_key(&wishlist, "PLANTOMART_WISHLIST_KEY")?;
        if cart == wishlist {
            return Err(ConfigError::InvalidEnvVar(
                "PLANTOMART_WISHLIST_KEY".to_string(),
                "must differ from PLANTOMART_CART_KEY".to_string(),
            ));
        }

        let badge_cap = env
            .get_or("PLANTOMART_BADGE_CAP", &BADGE_CAP.to_string())
            .parse::<usize>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("PLANTOMART_BADGE_CAP".to_string(), e.to_string())
            })?;

        let currency_code = env.get_or("PLANTOMART_CURRENCY", CurrencyCode::default().code());
        let currency = CurrencyCode::parse(&currency_code).ok_or_else(|| {
            ConfigError::InvalidEnvVar(
                "PLANTOMART_CURRENCY".to_string(),
                format!("unsupported currency {currency_code:?}"),
            )
        })?;

        let event_capacity = env
            .get_or("PLANTOMART_EVENT_CAPACITY", &DEFAULT_EVENT_CAPACITY.to_string())
            .parse::<usize>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("PLANTOMART_EVENT_CAPACITY".to_string(), e.to_string())
            })?;
        if event_capacity == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "PLANTOMART_EVENT_CAPACITY".to_string(),
                "must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            storage_dir,
            keys: StorageKeys { cart, wishlist },
            badge_cap,
            currency,
            event_capacity,
            sentry_dsn: env.get("SENTRY_DSN"),
            sentry_environment: env.get("SENTRY_ENVIRONMENT"),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Lookup<F>(F);

impl<F: Fn(&str) -> Option<String>> Lookup<F> {
    /// Get an optional variable, treating empty values as unset.
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.is_empty())
    }

    /// Get a variable with a default value.
    fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }
}

/// Storage keys double as file names, so keep them to a safe alphabet.
fn validate_key(key: &str, var_name: &str) -> Result<(), ConfigError> {
    if crate::storage::is_valid_key(key) {
        Ok(())
    } else {
        Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            "only ASCII letters, digits, '-' and '_' are allowed".to_string(),
        ))
    }
}
