//! Cross-instance change notification.
//!
//! Two channels tell mounted consumers that a list changed:
//!
//! - **Same tab**: a [`Notifier`] per tab broadcasts [`ListEvent`]s
//!   (`cartUpdated` / `wishlistUpdated`) carrying the list that was just
//!   persisted, so subscribers apply it without re-reading storage.
//! - **Other tabs**: storage changes from other tabs arrive without a usable
//!   payload and trigger a reload of the affected list from the store.
//!
//! A [`Subscription`] merges both. Mutations publish while holding the
//! origin write lock, and subscriptions drain same-tab events before
//! cross-tab changes; together that keeps a subscriber converging on the
//! last persisted value even when tabs write concurrently.

use std::collections::VecDeque;

use plantomart_core::{CartList, WishlistList};
use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::store::{ListKind, ListStore};
use crate::storage::{ListenEvent, LocalStorage, StorageListener};

/// A list was replaced; carries the new contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEvent {
    CartUpdated(CartList),
    WishlistUpdated(WishlistList),
}

impl ListEvent {
    /// The event name other components subscribe to.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.kind().event_name()
    }

    #[must_use]
    pub const fn kind(&self) -> ListKind {
        match self {
            Self::CartUpdated(_) => ListKind::Cart,
            Self::WishlistUpdated(_) => ListKind::Wishlist,
        }
    }
}

/// Same-tab broadcast of list updates.
#[derive(Debug, Clone)]
pub struct Notifier {
    sender: broadcast::Sender<ListEvent>,
}

impl Notifier {
    /// Create a notifier buffering up to `capacity` events per subscriber.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Announce a new list version. Returns how many subscribers will see it.
    pub fn publish(&self, event: ListEvent) -> usize {
        let name = event.name();
        let delivered = self.sender.send(event).unwrap_or(0);
        debug!(event = name, subscribers = delivered, "Published list update");
        delivered
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    pub(crate) fn receiver(&self) -> broadcast::Receiver<ListEvent> {
        self.sender.subscribe()
    }
}

/// Both notification channels for one consumer.
///
/// Dropping the subscription deregisters it from both channels.
#[derive(Debug)]
pub struct Subscription {
    events: broadcast::Receiver<ListEvent>,
    events_open: bool,
    changes: StorageListener,
    cart: ListStore<CartList>,
    wishlist: ListStore<WishlistList>,
    pending: VecDeque<ListEvent>,
}

impl Subscription {
    pub(crate) fn new(notifier: &Notifier, storage: &LocalStorage) -> Self {
        Self {
            events: notifier.receiver(),
            events_open: true,
            changes: storage.subscribe(),
            cart: ListStore::new(storage.clone()),
            wishlist: ListStore::new(storage.clone()),
            pending: VecDeque::new(),
        }
    }

    /// Next update that is already queued, without waiting.
    pub fn try_next(&mut self) -> Option<ListEvent> {
        if let Some(event) = self.pending.pop_front() {
            return Some(event);
        }

        if self.events_open {
            match self.events.try_recv() {
                Ok(event) => return Some(event),
                Err(broadcast::error::TryRecvError::Lagged(missed)) => {
                    self.resync(missed);
                    return self.pending.pop_front();
                }
                Err(broadcast::error::TryRecvError::Closed) => self.events_open = false,
                Err(broadcast::error::TryRecvError::Empty) => {}
            }
        }

        while let Some(event) = self.changes.try_recv() {
            if let Some(update) = self.on_storage_event(event) {
                return Some(update);
            }
        }
        None
    }

    /// Wait for the next update.
    ///
    /// Resolves to `None` only once both channels are closed.
    pub async fn next(&mut self) -> Option<ListEvent> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Some(event);
            }

            tokio::select! {
                biased;

                received = self.events.recv(), if self.events_open => match received {
                    Ok(event) => return Some(event),
                    Err(broadcast::error::RecvError::Lagged(missed)) => self.resync(missed),
                    Err(broadcast::error::RecvError::Closed) => self.events_open = false,
                },
                received = self.changes.recv() => match received {
                    Some(event) => {
                        if let Some(update) = self.on_storage_event(event) {
                            return Some(update);
                        }
                    }
                    None if self.events_open => {
                        // Only the same-tab channel is left.
                        return match self.events.recv().await {
                            Ok(event) => Some(event),
                            Err(_) => None,
                        };
                    }
                    None => return None,
                },
            }
        }
    }

    fn on_storage_event(&mut self, event: ListenEvent) -> Option<ListEvent> {
        match event {
            ListenEvent::Changed(change) => {
                let keys = &self.cart.storage().origin().config().keys;
                let kind = keys.kind_of(&change.key)?;
                debug!(key = %change.key, source = %change.source, "List changed in another tab");
                Some(self.reload(kind))
            }
            ListenEvent::Lagged(missed) => {
                self.resync(missed);
                self.pending.pop_front()
            }
        }
    }

    fn reload(&self, kind: ListKind) -> ListEvent {
        match kind {
            ListKind::Cart => ListEvent::CartUpdated(self.cart.load()),
            ListKind::Wishlist => ListEvent::WishlistUpdated(self.wishlist.load()),
        }
    }

    /// Missed notifications: queue fresh copies of both lists.
    fn resync(&mut self, missed: u64) {
        warn!(missed, "Subscriber lagged, reloading lists from storage");
        self.pending.clear();
        self.pending.push_back(self.reload(ListKind::Cart));
        self.pending.push_back(self.reload(ListKind::Wishlist));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use plantomart_core::{Item, ItemId};
    use rust_decimal::Decimal;

    use super::*;
    use crate::config::{StorageKeys, StorefrontConfig};
    use crate::storage::{Origin, TabId};

    fn item(id: &str) -> Item {
        Item::new(ItemId::parse(id).unwrap(), id, "₹10", Decimal::TEN, "")
    }

    fn cart_with(id: &str) -> CartList {
        let mut cart = CartList::new();
        cart.add(item(id));
        cart
    }

    #[test]
    fn test_event_names() {
        assert_eq!(ListEvent::CartUpdated(CartList::new()).name(), "cartUpdated");
        assert_eq!(
            ListEvent::WishlistUpdated(WishlistList::new()).name(),
            "wishlistUpdated"
        );
    }

    #[test]
    fn test_publish_without_subscribers() {
        let notifier = Notifier::new(4);
        assert_eq!(notifier.publish(ListEvent::CartUpdated(CartList::new())), 0);
    }

    #[test]
    fn test_same_tab_payload_is_delivered() {
        let origin = Origin::in_memory(StorefrontConfig::default());
        let storage = LocalStorage::new(origin, TabId::new());
        let notifier = Notifier::new(4);
        let mut subscription = Subscription::new(&notifier, &storage);

        let cart = cart_with("a");
        assert_eq!(notifier.publish(ListEvent::CartUpdated(cart.clone())), 1);
        assert_eq!(subscription.try_next(), Some(ListEvent::CartUpdated(cart)));
        assert_eq!(subscription.try_next(), None);
    }

    #[test]
    fn test_drop_deregisters() {
        let origin = Origin::in_memory(StorefrontConfig::default());
        let storage = LocalStorage::new(origin, TabId::new());
        let notifier = Notifier::new(4);

        let first = Subscription::new(&notifier, &storage);
        let second = Subscription::new(&notifier, &storage);
        assert_eq!(notifier.subscriber_count(), 2);
        drop(first);
        assert_eq!(notifier.subscriber_count(), 1);
        drop(second);
        assert_eq!(notifier.subscriber_count(), 0);
    }

    #[test]
    fn test_other_tab_change_reloads_from_store() {
        let origin = Origin::in_memory(StorefrontConfig::default());
        let here = LocalStorage::new(origin.clone(), TabId::new());
        let there = LocalStorage::new(origin, TabId::new());
        let mut subscription = Subscription::new(&Notifier::new(4), &here);

        let cart = cart_with("a");
        ListStore::<CartList>::new(there.clone()).save(&cart).unwrap();
        there.set("unrelated", "x").unwrap();

        assert_eq!(subscription.try_next(), Some(ListEvent::CartUpdated(cart)));
        assert_eq!(subscription.try_next(), None);
    }

    #[test]
    fn test_other_tab_change_follows_configured_keys() {
        let config = StorefrontConfig {
            keys: StorageKeys {
                cart: "cart_v2".to_string(),
                wishlist: "wishlist_v2".to_string(),
            },
            ..StorefrontConfig::default()
        };
        let origin = Origin::in_memory(config);
        let here = LocalStorage::new(origin.clone(), TabId::new());
        let there = LocalStorage::new(origin, TabId::new());
        let mut subscription = Subscription::new(&Notifier::new(4), &here);

        there.set("plantomartCart", "[]").unwrap();
        assert_eq!(subscription.try_next(), None);

        let mut wishlist = WishlistList::new();
        wishlist.add(item("w"));
        ListStore::<WishlistList>::new(there).save(&wishlist).unwrap();
        assert_eq!(
            subscription.try_next(),
            Some(ListEvent::WishlistUpdated(wishlist))
        );
    }

    #[test]
    fn test_own_storage_writes_are_ignored() {
        let origin = Origin::in_memory(StorefrontConfig::default());
        let here = LocalStorage::new(origin, TabId::new());
        let mut subscription = Subscription::new(&Notifier::new(4), &here);

        ListStore::<CartList>::new(here).save(&cart_with("a")).unwrap();
        assert_eq!(subscription.try_next(), None);
    }

    #[test]
    fn test_lag_resyncs_both_lists() {
        let origin = Origin::in_memory(StorefrontConfig::default());
        let storage = LocalStorage::new(origin, TabId::new());
        let notifier = Notifier::new(1);
        let mut subscription = Subscription::new(&notifier, &storage);

        let latest = cart_with("c");
        ListStore::<CartList>::new(storage).save(&latest).unwrap();
        notifier.publish(ListEvent::CartUpdated(cart_with("a")));
        notifier.publish(ListEvent::CartUpdated(cart_with("b")));
        notifier.publish(ListEvent::CartUpdated(latest.clone()));

        assert_eq!(subscription.try_next(), Some(ListEvent::CartUpdated(latest)));
        assert_eq!(
            subscription.try_next(),
            Some(ListEvent::WishlistUpdated(WishlistList::new()))
        );
    }

    #[tokio::test]
    async fn test_next_waits_for_publish() {
        let origin = Origin::in_memory(StorefrontConfig::default());
        let storage = LocalStorage::new(origin, TabId::new());
        let notifier = Notifier::new(4);
        let mut subscription = Subscription::new(&notifier, &storage);

        let publisher = notifier.clone();
        let cart = cart_with("a");
        let expected = cart.clone();
        tokio::spawn(async move {
            publisher.publish(ListEvent::CartUpdated(cart));
        });

        assert_eq!(subscription.next().await, Some(ListEvent::CartUpdated(expected)));
    }
}
