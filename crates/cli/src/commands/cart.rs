//! `pm-cli cart` subcommands.

use plantomart_core::{CartList, CurrencyCode, ItemId, format_amount};
use plantomart_storefront::Tab;
use tracing::info;

use super::{CommandError, ItemArgs};

/// Log every line, then the badge and subtotal the navigation bar would show.
pub fn list(tab: &Tab) {
    let consumer = tab.mount();
    let currency = tab.origin().config().currency;

    for line in describe(consumer.cart(), currency) {
        info!("{line}");
    }
    info!(
        "Badge: {}",
        consumer.cart_badge().unwrap_or_else(|| "(hidden)".to_string())
    );
    info!("Subtotal: {}", consumer.subtotal_display());
}

/// Add one unit of an item.
///
/// # Errors
///
/// Returns `CommandError` if the id is invalid or the cart cannot be written.
pub fn add(tab: &Tab, args: ItemArgs) -> Result<(), CommandError> {
    let item = args.into_item(tab.origin().config().currency)?;
    let id = item.id.clone();
    let cart = tab.cart().add(item)?;

    if let Some(entry) = cart.get(&id) {
        info!("{} now has quantity {}", entry.item.title, entry.quantity);
    }
    Ok(())
}

/// Set a line's quantity. Values below one leave the cart unchanged.
///
/// # Errors
///
/// Returns `CommandError` if the id is invalid or the cart cannot be written.
pub fn set_quantity(tab: &Tab, id: &str, quantity: i64) -> Result<(), CommandError> {
    let id = ItemId::parse(id)?;
    let Ok(requested) = u32::try_from(quantity) else {
        info!("Quantity {quantity} is out of range; cart unchanged");
        return Ok(());
    };

    let cart = tab.cart().update_quantity(&id, requested)?;
    match cart.get(&id) {
        Some(entry) if entry.quantity.get() == requested => {
            info!("{} quantity set to {}", entry.item.title, entry.quantity);
        }
        Some(entry) => info!("Quantity must be at least 1; {} unchanged", entry.item.title),
        None => info!("Item {id} is not in the cart"),
    }
    Ok(())
}

/// Remove a line.
///
/// # Errors
///
/// Returns `CommandError` if the id is invalid or the cart cannot be written.
pub fn remove(tab: &Tab, id: &str) -> Result<(), CommandError> {
    let id = ItemId::parse(id)?;
    let before = tab.cart().items();
    tab.cart().remove(&id)?;

    if before.contains(&id) {
        info!("Removed {id} from the cart");
    } else {
        info!("Item {id} is not in the cart");
    }
    Ok(())
}

/// One line of text per cart line.
pub(crate) fn describe(cart: &CartList, currency: CurrencyCode) -> Vec<String> {
    if cart.entries().is_empty() {
        return vec!["Your cart is empty".to_string()];
    }
    cart.iter()
        .map(|entry| {
            format!(
                "{} x{} {} ({} each, {})",
                entry.id(),
                entry.quantity,
                entry.item.title,
                entry.item.price,
                format_amount(entry.line_total(), currency)
            )
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use plantomart_core::Item;
    use plantomart_storefront::StorefrontConfig;
    use rust_decimal::Decimal;
    use tempfile::TempDir;

    use super::*;

    fn item_args(id: &str, price: i64) -> ItemArgs {
        ItemArgs {
            id: id.to_string(),
            title: format!("Plant {id}"),
            price: Decimal::from(price),
            display_price: None,
            image: String::new(),
            tag: None,
        }
    }

    fn file_tab(dir: &TempDir) -> Tab {
        let config = StorefrontConfig {
            storage_dir: dir.path().to_path_buf(),
            ..StorefrontConfig::default()
        };
        crate::commands::open_tab(config).unwrap()
    }

    #[test]
    fn test_describe_empty_cart() {
        assert_eq!(describe(&CartList::new(), CurrencyCode::INR), ["Your cart is empty"]);
    }

    #[test]
    fn test_describe_lines() {
        let mut cart = CartList::new();
        let item = Item::new(
            ItemId::parse("1").unwrap(),
            "Snake Plant",
            "₹250",
            Decimal::from(250),
            "",
        );
        cart.add(item.clone());
        cart.add(item);
        assert_eq!(
            describe(&cart, CurrencyCode::INR),
            ["1 x2 Snake Plant (₹250 each, ₹500)"]
        );
    }

    #[test]
    fn test_commands_persist_to_storage_dir() {
        let dir = TempDir::new().unwrap();
        let tab = file_tab(&dir);

        add(&tab, item_args("1", 250)).unwrap();
        add(&tab, item_args("1", 250)).unwrap();
        add(&tab, item_args("2", 99)).unwrap();
        set_quantity(&tab, "2", 0).unwrap();
        set_quantity(&tab, "2", -4).unwrap();
        remove(&tab, "missing").unwrap();

        let reopened = file_tab(&dir);
        let cart = reopened.cart().items();
        assert_eq!(cart.subtotal(), Decimal::from(599));
        assert!(dir.path().join("plantomartCart.json").exists());
    }

    #[test]
    fn test_invalid_id_is_an_error() {
        let dir = TempDir::new().unwrap();
        let tab = file_tab(&dir);
        assert!(matches!(remove(&tab, " "), Err(CommandError::InvalidId(_))));
    }
}
