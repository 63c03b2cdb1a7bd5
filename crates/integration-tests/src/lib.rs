//! Integration tests for Plantomart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p plantomart-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `list_persistence` - Stored format, fail-open loading, reopening a storage directory
//! - `cart_wishlist` - Cart and wishlist operations through a tab
//! - `cross_tab` - Same-tab and cross-tab notifications reaching mounted consumers

use std::path::Path;

use plantomart_core::{Item, ItemId};
use plantomart_storefront::{Origin, StorefrontConfig};
use rust_decimal::Decimal;

/// A catalog item priced in whole rupees, titled after its id.
///
/// # Panics
///
/// Panics if `id` is not a valid item id.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn sample_item(id: &str, price: i64) -> Item {
    Item::new(
        ItemId::parse(id).unwrap(),
        format!("Plant {id}"),
        format!("₹{price}"),
        Decimal::from(price),
        format!("/assets/{id}.png"),
    )
}

/// Parse an item id.
///
/// # Panics
///
/// Panics if `id` is not a valid item id.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn id(id: &str) -> ItemId {
    ItemId::parse(id).unwrap()
}

/// An origin backed by an in-memory store.
#[must_use]
pub fn memory_origin() -> Origin {
    Origin::in_memory(StorefrontConfig::default())
}

/// An origin persisted under `dir`.
///
/// # Panics
///
/// Panics if the directory cannot be opened.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn file_origin(dir: &Path) -> Origin {
    Origin::open(StorefrontConfig {
        storage_dir: dir.to_path_buf(),
        ..StorefrontConfig::default()
    })
    .unwrap()
}
