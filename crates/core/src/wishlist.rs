//! The wishlist: saved items without quantities.

use serde::{Deserialize, Serialize};

use crate::list::EntryList;
use crate::types::{ItemId, WishlistEntry};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WishlistList(Vec<WishlistEntry>);

impl WishlistList {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    #[must_use]
    pub fn entries(&self) -> &[WishlistEntry] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WishlistEntry> {
        self.0.iter()
    }

    #[must_use]
    pub fn get(&self, id: &ItemId) -> Option<&WishlistEntry> {
        self.0.iter().find(|item| &item.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &ItemId) -> bool {
        self.get(id).is_some()
    }

    /// Save `item`. Returns `false` if it was already saved.
    pub fn add(&mut self, item: WishlistEntry) -> bool {
        if self.contains(&item.id) {
            return false;
        }
        self.0.push(item);
        true
    }

    /// Drop `id`. Returns `true` if an entry was removed.
    pub fn remove(&mut self, id: &ItemId) -> bool {
        let before = self.0.len();
        self.0.retain(|item| &item.id != id);
        self.0.len() != before
    }
}

impl EntryList for WishlistList {
    fn len(&self) -> usize {
        self.0.len()
    }

    fn ids(&self) -> Vec<&ItemId> {
        self.0.iter().map(|item| &item.id).collect()
    }
}

impl From<Vec<WishlistEntry>> for WishlistList {
    fn from(entries: Vec<WishlistEntry>) -> Self {
        Self(entries)
    }
}

impl<'a> IntoIterator for &'a WishlistList {
    type Item = &'a WishlistEntry;
    type IntoIter = std::slice::Iter<'a, WishlistEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
