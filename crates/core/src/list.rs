//! Behaviour shared by the cart and the wishlist.

use std::collections::HashSet;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::types::ItemId;

/// A stored list failed validation.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ListError {
    /// Two entries share an id.
    #[error("duplicate entry for item {0}")]
    DuplicateId(ItemId),
}

/// An ordered list of entries, unique by item id, persisted as a JSON array.
pub trait EntryList: Clone + Default + PartialEq + Serialize + DeserializeOwned + Send + Sync {
    /// Number of entries (not units).
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ids in list order.
    fn ids(&self) -> Vec<&ItemId>;

    /// Check the invariants that deserialization alone cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::DuplicateId`] for the first id seen twice.
    fn validate(&self) -> Result<(), ListError> {
        let mut seen = HashSet::new();
        for id in self.ids() {
            if !seen.insert(id) {
                return Err(ListError::DuplicateId(id.clone()));
            }
        }
        Ok(())
    }
}
