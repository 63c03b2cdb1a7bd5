//! `pm-cli wishlist` subcommands.

use plantomart_core::{EntryList, ItemId};
use plantomart_storefront::Tab;
use tracing::info;

use super::{CommandError, ItemArgs};

/// Log every saved item and the badge.
pub fn list(tab: &Tab) {
    let consumer = tab.mount();
    let wishlist = consumer.wishlist();

    if wishlist.entries().is_empty() {
        info!("Your wishlist is empty");
    }
    for item in wishlist {
        match &item.tag {
            Some(tag) => info!("{} {} ({}) [{tag}]", item.id, item.title, item.price),
            None => info!("{} {} ({})", item.id, item.title, item.price),
        }
    }
    info!(
        "Badge: {}",
        consumer.wishlist_badge().unwrap_or_else(|| "(hidden)".to_string())
    );
}

/// Save an item.
///
/// # Errors
///
/// Returns `CommandError` if the id is invalid or the wishlist cannot be written.
pub fn add(tab: &Tab, args: ItemArgs) -> Result<(), CommandError> {
    let item = args.into_item(tab.origin().config().currency)?;
    let title = item.title.clone();
    let before = tab.wishlist().items().len();
    let wishlist = tab.wishlist().add(item)?;

    if wishlist.entries().len() > before {
        info!("Saved {title} to the wishlist");
    } else {
        info!("{title} is already in the wishlist");
    }
    Ok(())
}

/// Remove a saved item.
///
/// # Errors
///
/// Returns `CommandError` if the id is invalid or the wishlist cannot be written.
pub fn remove(tab: &Tab, id: &str) -> Result<(), CommandError> {
    let id = ItemId::parse(id)?;
    let before = tab.wishlist().items();
    tab.wishlist().remove(&id)?;

    if before.contains(&id) {
        info!("Removed {id} from the wishlist");
    } else {
        info!("Item {id} is not in the wishlist");
    }
    Ok(())
}

/// Add a saved item to the cart. The wishlist entry is kept.
///
/// # Errors
///
/// Returns `CommandError::NotInWishlist` if `id` is not saved, or a store
/// error if the cart cannot be written.
pub fn move_to_cart(tab: &Tab, id: &str) -> Result<(), CommandError> {
    let id = ItemId::parse(id)?;
    let Some(item) = tab.wishlist().items().get(&id).cloned() else {
        return Err(CommandError::NotInWishlist(id));
    };

    let title = item.title.clone();
    let cart = tab.move_wishlist_item_to_cart(item)?;
    if let Some(entry) = cart.get(&id) {
        info!("Added {title} to the cart (quantity {})", entry.quantity);
    }
    Ok(())
}
