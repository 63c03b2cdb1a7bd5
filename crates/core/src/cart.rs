//! The shopping cart list.
//!
//! All transforms work on an owned, in-memory copy; persisting the result and
//! announcing it is the storefront's job.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::list::EntryList;
use crate::types::{CartEntry, Item, ItemId, Quantity};

/// Cart lines in the order they were first added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartList(Vec<CartEntry>);

impl CartList {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    #[must_use]
    pub fn entries(&self) -> &[CartEntry] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CartEntry> {
        self.0.iter()
    }

    #[must_use]
    pub fn get(&self, id: &ItemId) -> Option<&CartEntry> {
        self.0.iter().find(|entry| entry.id() == id)
    }

    #[must_use]
    pub fn contains(&self, id: &ItemId) -> bool {
        self.get(id).is_some()
    }

    /// Add one unit of `item`.
    ///
    /// An existing line for the same id gets its quantity bumped by one and
    /// keeps its position; otherwise a new line with quantity 1 is appended.
    /// Returns the line's resulting quantity.
    pub fn add(&mut self, item: Item) -> Quantity {
        if let Some(entry) = self.0.iter_mut().find(|entry| entry.item.id == item.id) {
            entry.quantity = entry.quantity.incremented();
            return entry.quantity;
        }
        self.0.push(CartEntry::new(item));
        Quantity::ONE
    }

    /// Set the quantity of the line for `id`.
    ///
    /// Requests below one are ignored rather than removing the line. Returns
    /// `true` if the list changed.
    pub fn update_quantity(&mut self, id: &ItemId, requested: u32) -> bool {
        let Some(quantity) = Quantity::new(requested) else {
            return false;
        };
        match self.0.iter_mut().find(|entry| entry.id() == id) {
            Some(entry) if entry.quantity != quantity => {
                entry.quantity = quantity;
                true
            }
            _ => false,
        }
    }

    /// Drop the line for `id`. Returns `true` if a line was removed.
    pub fn remove(&mut self, id: &ItemId) -> bool {
        let before = self.0.len();
        self.0.retain(|entry| entry.id() != id);
        self.0.len() != before
    }

    /// Sum of `numeric_price × quantity` over all lines, saturating at the
    /// bounds of `Decimal`.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.0
            .iter()
            .map(CartEntry::line_total)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    /// Total units across all lines.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.0.iter().map(|entry| u64::from(entry.quantity.get())).sum()
    }
}

impl EntryList for CartList {
    fn len(&self) -> usize {
        self.0.len()
    }

    fn ids(&self) -> Vec<&ItemId> {
        self.0.iter().map(CartEntry::id).collect()
    }
}

impl From<Vec<CartEntry>> for CartList {
    fn from(entries: Vec<CartEntry>) -> Self {
        Self(entries)
    }
}

impl IntoIterator for CartList {
    type Item = CartEntry;
    type IntoIter = std::vec::IntoIter<CartEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a CartList {
    type Item = &'a CartEntry;
    type IntoIter = std::slice::Iter<'a, CartEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
