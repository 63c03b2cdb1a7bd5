//! Subcommand implementations.
//!
//! Output goes through `tracing` at info level, like every other message the
//! CLI prints.

pub mod cart;
pub mod collections;
pub mod wishlist;

use clap::Args;
use plantomart_core::{CurrencyCode, Item, ItemId, ItemIdError, format_amount};
use plantomart_storefront::{ConfigError, Origin, StorageError, StoreError, StorefrontConfig, Tab};
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Storage directory could not be opened.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// A list could not be written.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Item id argument is invalid.
    #[error("Invalid item id: {0}")]
    InvalidId(#[from] ItemIdError),

    /// `wishlist move` was given an id that is not saved.
    #[error("Item {0} is not in the wishlist")]
    NotInWishlist(ItemId),
}

/// Open a tab on the file-backed origin described by `config`.
///
/// # Errors
///
/// Returns `CommandError::Storage` if the storage directory cannot be created.
pub fn open_tab(config: StorefrontConfig) -> Result<Tab, CommandError> {
    let origin = Origin::open(config)?;
    Ok(origin.open_tab())
}

/// Catalog fields of an item given on the command line.
#[derive(Debug, Args)]
pub struct ItemArgs {
    /// Catalog item id
    #[arg(long)]
    pub id: String,

    /// Display title
    #[arg(long)]
    pub title: String,

    /// Numeric price
    #[arg(long)]
    pub price: Decimal,

    /// Display price (defaults to the formatted numeric price)
    #[arg(long)]
    pub display_price: Option<String>,

    /// Image path or URL
    #[arg(long, default_value = "")]
    pub image: String,

    /// Optional tag, e.g. "Bestseller"
    #[arg(long)]
    pub tag: Option<String>,
}

impl ItemArgs {
    /// Build the catalog item.
    ///
    /// # Errors
    ///
    /// Returns `ItemIdError` if the id is empty.
    pub fn into_item(self, currency: CurrencyCode) -> Result<Item, ItemIdError> {
        let id = ItemId::parse(&self.id)?;
        let display_price = self
            .display_price
            .unwrap_or_else(|| format_amount(self.price, currency));
        let item = Item::new(id, self.title, display_price, self.price, self.image);
        Ok(match self.tag {
            Some(tag) => item.with_tag(tag),
            None => item,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn args(id: &str) -> ItemArgs {
        ItemArgs {
            id: id.to_string(),
            title: "Snake Plant".to_string(),
            price: Decimal::from(1250),
            display_price: None,
            image: String::new(),
            tag: Some("Bestseller".to_string()),
        }
    }

    #[test]
    fn test_display_price_defaults_to_formatted_price() {
        let item = args("1").into_item(CurrencyCode::INR).unwrap();
        assert_eq!(item.price, "₹1,250");
        assert_eq!(item.tag.as_deref(), Some("Bestseller"));
    }

    #[test]
    fn test_explicit_display_price_is_kept() {
        let mut args = args("1");
        args.display_price = Some("Rs. 1250".to_string());
        assert_eq!(args.into_item(CurrencyCode::INR).unwrap().price, "Rs. 1250");
    }

    #[test]
    fn test_empty_id_rejected() {
        assert!(args("").into_item(CurrencyCode::INR).is_err());
    }
}
