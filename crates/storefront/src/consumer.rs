//! Mounted consumers of the cart and wishlist.
//!
//! A [`Consumer`] is the state behind one mounted component (the navigation
//! bar, a cart page, a checkout summary). It keeps in-memory copies of both
//! lists, refreshed from notifications, and derives what the component
//! shows. Dropping it unmounts it and releases its listeners.

use plantomart_core::{CartList, CurrencyCode, EntryList, WishlistList, badge, format_amount};
use rust_decimal::Decimal;
use tracing::debug;

use crate::notifier::{ListEvent, Subscription};
use crate::panels::PanelState;
use crate::store::ListKind;
use crate::tab::Tab;

#[derive(Debug)]
pub struct Consumer {
    cart: CartList,
    wishlist: WishlistList,
    subscription: Subscription,
    panels: PanelState,
    badge_cap: usize,
    currency: CurrencyCode,
}

impl Consumer {
    /// Subscribe to `tab` and load both lists.
    ///
    /// The subscription is taken before loading so a write landing in
    /// between is delivered rather than missed.
    #[must_use]
    pub fn mount(tab: &Tab) -> Self {
        let subscription = tab.subscribe();
        let config = tab.origin().config();
        let consumer = Self {
            cart: tab.cart().items(),
            wishlist: tab.wishlist().items(),
            subscription,
            panels: PanelState::new(),
            badge_cap: config.badge_cap,
            currency: config.currency,
        };
        debug!(
            tab = %tab.id(),
            cart = consumer.cart.len(),
            wishlist = consumer.wishlist.len(),
            "Mounted consumer"
        );
        consumer
    }

    /// Apply every queued notification. Returns how many were applied.
    pub fn refresh(&mut self) -> usize {
        let mut applied = 0;
        while let Some(event) = self.subscription.try_next() {
            self.apply(event);
            applied += 1;
        }
        applied
    }

    /// Wait for the next notification and apply it.
    ///
    /// Returns the kind of list that changed, or `None` once no update can
    /// arrive any more.
    pub async fn changed(&mut self) -> Option<ListKind> {
        let event = self.subscription.next().await?;
        let kind = event.kind();
        self.apply(event);
        Some(kind)
    }

    fn apply(&mut self, event: ListEvent) {
        match event {
            ListEvent::CartUpdated(cart) => self.cart = cart,
            ListEvent::WishlistUpdated(wishlist) => self.wishlist = wishlist,
        }
    }

    #[must_use]
    pub const fn cart(&self) -> &CartList {
        &self.cart
    }

    #[must_use]
    pub const fn wishlist(&self) -> &WishlistList {
        &self.wishlist
    }

    /// Cart badge text; `None` hides the badge.
    #[must_use]
    pub fn cart_badge(&self) -> Option<String> {
        badge(self.cart.len(), self.badge_cap)
    }

    /// Wishlist badge text; `None` hides the badge.
    #[must_use]
    pub fn wishlist_badge(&self) -> Option<String> {
        badge(self.wishlist.len(), self.badge_cap)
    }

    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.cart.subtotal()
    }

    /// Subtotal formatted for the cart drawer, e.g. `₹1,250`.
    #[must_use]
    pub fn subtotal_display(&self) -> String {
        format_amount(self.subtotal(), self.currency)
    }

    #[must_use]
    pub const fn panels(&self) -> &PanelState {
        &self.panels
    }

    pub const fn panels_mut(&mut self) -> &mut PanelState {
        &mut self.panels
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use plantomart_core::{Item, ItemId};

    use super::*;
    use crate::config::StorefrontConfig;
    use crate::storage::Origin;

    fn item(id: &str, price: i64) -> Item {
        Item::new(
            ItemId::parse(id).unwrap(),
            id,
            format!("₹{price}"),
            Decimal::from(price),
            "",
        )
    }

    #[test]
    fn test_mount_loads_existing_lists() {
        let origin = Origin::in_memory(StorefrontConfig::default());
        let tab = origin.open_tab();
        tab.cart().add(item("a", 250)).unwrap();
        tab.wishlist().add(item("w", 99)).unwrap();

        let consumer = tab.mount();
        assert_eq!(consumer.cart().len(), 1);
        assert_eq!(consumer.wishlist().len(), 1);
    }

    #[test]
    fn test_badges_and_subtotal() {
        let origin = Origin::in_memory(StorefrontConfig::default());
        let tab = origin.open_tab();
        let mut consumer = tab.mount();
        assert_eq!(consumer.cart_badge(), None);
        assert_eq!(consumer.subtotal_display(), "₹0");

        tab.cart().add(item("a", 250)).unwrap();
        tab.cart().add(item("a", 250)).unwrap();
        tab.cart().add(item("b", 99)).unwrap();
        for n in 0..6 {
            tab.wishlist().add(item(&format!("w{n}"), 1)).unwrap();
        }

        assert_eq!(consumer.refresh(), 9);
        assert_eq!(consumer.cart_badge().as_deref(), Some("2"));
        assert_eq!(consumer.wishlist_badge().as_deref(), Some("5+"));
        assert_eq!(consumer.subtotal(), Decimal::from(599));
        assert_eq!(consumer.subtotal_display(), "₹599");
    }

    #[test]
    fn test_all_mounted_consumers_converge() {
        let origin = Origin::in_memory(StorefrontConfig::default());
        let tab = origin.open_tab();
        let mut navbar = tab.mount();
        let mut drawer = tab.mount();

        let cart = tab.cart().add(item("a", 10)).unwrap();
        navbar.refresh();
        drawer.refresh();
        assert_eq!(navbar.cart(), &cart);
        assert_eq!(drawer.cart(), &cart);
    }

    #[test]
    fn test_unmount_releases_listeners() {
        let origin = Origin::in_memory(StorefrontConfig::default());
        let tab = origin.open_tab();
        let consumer = tab.mount();
        assert_eq!(tab.notifier().subscriber_count(), 1);
        drop(consumer);
        assert_eq!(tab.notifier().subscriber_count(), 0);
    }

    #[test]
    fn test_panels_are_per_consumer() {
        let origin = Origin::in_memory(StorefrontConfig::default());
        let tab = origin.open_tab();
        let mut a = tab.mount();
        let b = tab.mount();

        a.panels_mut().toggle_cart();
        assert!(a.panels().is_cart_open());
        assert!(!b.panels().is_cart_open());
    }

    #[tokio::test]
    async fn test_changed_reports_kind() {
        let origin = Origin::in_memory(StorefrontConfig::default());
        let tab = origin.open_tab();
        let mut consumer = tab.mount();

        let writer = tab.clone();
        tokio::spawn(async move {
            writer.wishlist().add(item("w", 5)).unwrap();
        });

        assert_eq!(consumer.changed().await, Some(ListKind::Wishlist));
        assert_eq!(consumer.wishlist().len(), 1);
    }
}
