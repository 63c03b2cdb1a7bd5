//! Per-tab cart and wishlist services.
//!
//! A [`Tab`] is built once per browsing context and passed by reference to
//! whatever needs the lists. Every mutation runs under the origin write
//! lock as load, transform, save, publish; a transform that changes nothing
//! skips both the save and the event.

use plantomart_core::{CartList, Item, ItemId, WishlistEntry, WishlistList};
use tracing::{debug, instrument};

use crate::consumer::Consumer;
use crate::error::Result;
use crate::notifier::{Notifier, Subscription};
use crate::storage::{LocalStorage, Origin, TabId};
use crate::store::{ListStore, StoredList};

/// Mutating access to one list kind, announcing every change.
#[derive(Debug, Clone)]
pub struct ListService<L> {
    store: ListStore<L>,
    notifier: Notifier,
}

/// The cart service.
pub type CartStore = ListService<CartList>;
/// The wishlist service.
pub type WishlistStore = ListService<WishlistList>;

impl<L: StoredList> ListService<L> {
    #[must_use]
    pub fn new(storage: LocalStorage, notifier: Notifier) -> Self {
        Self {
            store: ListStore::new(storage),
            notifier,
        }
    }

    /// Current persisted contents.
    #[must_use]
    pub fn items(&self) -> L {
        self.store.load()
    }

    #[must_use]
    pub const fn store(&self) -> &ListStore<L> {
        &self.store
    }

    /// Apply `transform` to the persisted list and return the result.
    ///
    /// `transform` returns whether it changed the list. If the stored list
    /// cannot be read, nothing is written.
    fn mutate(&self, transform: impl FnOnce(&mut L) -> bool) -> Result<L> {
        let _guard = self.store.storage().origin().write_lock()?;

        let mut list = self.store.load_for_update()?;
        if !transform(&mut list) {
            debug!(key = self.store.key(), "{} unchanged", L::KIND);
            return Ok(list);
        }

        self.store.save(&list)?;
        self.notifier.publish(list.clone().into_event());
        Ok(list)
    }
}

impl ListService<CartList> {
    /// Add one unit of `item`, appending a new line if it is not in the cart.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the cart cannot be written.
    #[instrument(skip(self, item), fields(item_id = %item.id))]
    pub fn add(&self, item: Item) -> Result<CartList> {
        self.mutate(|cart| {
            cart.add(item);
            true
        })
    }

    /// Set a line's quantity. Requests below one are ignored.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the cart cannot be written.
    #[instrument(skip(self, id), fields(item_id = %id))]
    pub fn update_quantity(&self, id: &ItemId, requested: u32) -> Result<CartList> {
        self.mutate(|cart| cart.update_quantity(id, requested))
    }

    /// Remove a line. Unknown ids are ignored.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the cart cannot be written.
    #[instrument(skip(self, id), fields(item_id = %id))]
    pub fn remove(&self, id: &ItemId) -> Result<CartList> {
        self.mutate(|cart| cart.remove(id))
    }
}

impl ListService<WishlistList> {
    /// Save `item` unless it is already saved.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the wishlist cannot be written.
    #[instrument(skip(self, item), fields(item_id = %item.id))]
    pub fn add(&self, item: WishlistEntry) -> Result<WishlistList> {
        self.mutate(|wishlist| wishlist.add(item))
    }

    /// Remove an entry. Unknown ids are ignored.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the wishlist cannot be written.
    #[instrument(skip(self, id), fields(item_id = %id))]
    pub fn remove(&self, id: &ItemId) -> Result<WishlistList> {
        self.mutate(|wishlist| wishlist.remove(id))
    }
}

/// One browsing context of an origin.
#[derive(Debug, Clone)]
pub struct Tab {
    storage: LocalStorage,
    notifier: Notifier,
    cart: CartStore,
    wishlist: WishlistStore,
}

impl Tab {
    /// Open a tab with a fresh id and its own notifier.
    #[must_use]
    pub fn open(origin: &Origin) -> Self {
        let storage = LocalStorage::new(origin.clone(), TabId::new());
        let notifier = Notifier::new(origin.config().event_capacity);
        debug!(tab = %storage.tab(), "Opened tab");
        Self {
            cart: CartStore::new(storage.clone(), notifier.clone()),
            wishlist: WishlistStore::new(storage.clone(), notifier.clone()),
            storage,
            notifier,
        }
    }

    #[must_use]
    pub const fn id(&self) -> TabId {
        self.storage.tab()
    }

    #[must_use]
    pub const fn origin(&self) -> &Origin {
        self.storage.origin()
    }

    #[must_use]
    pub const fn storage(&self) -> &LocalStorage {
        &self.storage
    }

    #[must_use]
    pub const fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    #[must_use]
    pub const fn cart(&self) -> &CartStore {
        &self.cart
    }

    #[must_use]
    pub const fn wishlist(&self) -> &WishlistStore {
        &self.wishlist
    }

    /// Add a wishlist item to the cart. The wishlist itself is left as is;
    /// removing the item from it is a separate action.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the cart cannot be written.
    pub fn move_wishlist_item_to_cart(&self, item: WishlistEntry) -> Result<CartList> {
        self.cart.add(item)
    }

    /// Listen for list updates from this tab and from other tabs.
    #[must_use]
    pub fn subscribe(&self) -> Subscription {
        Subscription::new(&self.notifier, &self.storage)
    }

    /// Mount a consumer on this tab.
    #[must_use]
    pub fn mount(&self) -> Consumer {
        Consumer::mount(self)
    }
}
