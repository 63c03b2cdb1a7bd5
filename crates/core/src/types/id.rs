//! Catalog item identifiers.
//!
//! Item ids come from the product catalog and are opaque strings. The only
//! structural rule is that an id is never empty, since cart and wishlist
//! uniqueness is keyed on it.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`ItemId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ItemIdError {
    /// The input string is empty or only whitespace.
    #[error("item id cannot be empty")]
    Empty,
}

/// A catalog item identifier.
///
/// ## Examples
///
/// ```
/// use plantomart_core::ItemId;
///
/// assert!(ItemId::parse("snake-plant").is_ok());
/// assert!(ItemId::parse("").is_err());
/// assert!(ItemId::parse("   ").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct ItemId(String);

impl ItemId {
    /// Parse an `ItemId` from a string.
    ///
    /// # Errors
    ///
    /// Returns [`ItemIdError::Empty`] if the input is empty or whitespace.
    pub fn parse(s: &str) -> Result<Self, ItemIdError> {
        if s.trim().is_empty() {
            return Err(ItemIdError::Empty);
        }
        Ok(Self(s.to_owned()))
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `ItemId` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ItemId {
    type Err = ItemIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ItemId {
    type Error = ItemIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.trim().is_empty() {
            return Err(ItemIdError::Empty);
        }
        Ok(Self(value))
    }
}

impl From<ItemId> for String {
    fn from(id: ItemId) -> Self {
        id.0
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ItemId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ItemId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_ids() {
        assert!(ItemId::parse("1").is_ok());
        assert!(ItemId::parse("snake-plant").is_ok());
        assert!(ItemId::parse("prod_42").is_ok());
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(ItemId::parse(""), Err(ItemIdError::Empty));
        assert_eq!(ItemId::parse("  "), Err(ItemIdError::Empty));
    }

    #[test]
    fn test_serde_is_bare_string() {
        let id = ItemId::parse("fern").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"fern\"");

        let parsed: ItemId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_deserialize_rejects_empty() {
        let result: Result<ItemId, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_compare_with_str() {
        let id = ItemId::parse("fern").unwrap();
        assert!(id == "fern");
        assert_eq!(id.as_str(), "fern");
        assert_eq!(id.to_string(), "fern");
    }
}
