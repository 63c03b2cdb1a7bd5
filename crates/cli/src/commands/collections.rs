//! `pm-cli collections`.

use plantomart_core::{Route, featured_collections};
use tracing::info;

/// Log the featured collections grid.
pub fn list() {
    for collection in featured_collections() {
        info!(
            image = collection.image,
            "{}: {}",
            collection.title,
            collection.description
        );
    }
    info!("Browse everything at {}", Route::Products);
}
