//! Catalog items and the list entries built from them.
//!
//! The JSON shape matches what other pages of the site read from the same
//! storage keys:
//!
//! ```json
//! {"id":"1","title":"Snake Plant","price":"₹250","image":"/assets/snake.png",
//!  "tag":"Bestseller","numericPrice":250.0,"quantity":2}
//! ```

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ItemId, Quantity};

/// A catalog entry reference, as supplied by the product catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    /// Display price, already formatted by the catalog (e.g. "₹250").
    pub price: String,
    /// Price used for arithmetic. Stored as a JSON number, so it only keeps
    /// the precision an `f64` can carry; see [`normalize_price`].
    #[serde(with = "numeric_price")]
    pub numeric_price: Decimal,
    /// Image path or URL.
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

impl Item {
    /// Create an item without a tag. `numeric_price` is passed through
    /// [`normalize_price`].
    #[must_use]
    pub fn new(
        id: ItemId,
        title: impl Into<String>,
        price: impl Into<String>,
        numeric_price: Decimal,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            price: price.into(),
            numeric_price: normalize_price(numeric_price),
            image: image.into(),
            tag: None,
        }
    }

    /// Attach a tag (e.g. "Bestseller").
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }
}

/// A cart line: an item plus how many units of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    #[serde(flatten)]
    pub item: Item,
    pub quantity: Quantity,
}

impl CartEntry {
    /// A new cart line with a single unit.
    #[must_use]
    pub const fn new(item: Item) -> Self {
        Self {
            item,
            quantity: Quantity::ONE,
        }
    }

    #[must_use]
    pub const fn id(&self) -> &ItemId {
        &self.item.id
    }

    /// `numeric_price × quantity`, saturating at the bounds of `Decimal`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.item
            .numeric_price
            .saturating_mul(Decimal::from(self.quantity.get()))
    }
}

/// Round `price` to the value it will have after being stored and read back.
///
/// Prices are written as JSON numbers, i.e. through an `f64`. Normalizing up
/// front keeps the in-memory list equal to the persisted one. Values whose
/// `f64` form has no `Decimal` counterpart are returned unchanged.
#[must_use]
pub fn normalize_price(price: Decimal) -> Decimal {
    price_to_float(price).and_then(price_from_float).unwrap_or(price)
}

fn price_to_float(price: Decimal) -> Option<f64> {
    f64::from_str(&price.to_string())
        .ok()
        .filter(|float| float.is_finite())
}

fn price_from_float(float: f64) -> Option<Decimal> {
    if !float.is_finite() {
        return None;
    }
    // f64's Display is the shortest string that parses back to the same
    // value and never uses an exponent.
    Decimal::from_str(&float.to_string()).ok()
}

mod numeric_price {
    use rust_decimal::Decimal;
    use serde::de::Error as _;
    use serde::ser::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(price: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
        let float = super::price_to_float(*price)
            .ok_or_else(|| S::Error::custom(format!("price {price} has no f64 form")))?;
        serializer.serialize_f64(float)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
        let float = f64::deserialize(deserializer)?;
        super::price_from_float(float)
            .ok_or_else(|| D::Error::custom(format!("price {float} is out of range")))
    }
}

/// A wishlist entry carries no quantity.
pub type WishlistEntry = Item;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn fern() -> Item {
        Item::new(
            ItemId::parse("fern").unwrap(),
            "Boston Fern",
            "₹349",
            Decimal::from(349),
            "/assets/fern.png",
        )
    }

    #[test]
    fn test_item_json_uses_camel_case() {
        let json = serde_json::to_value(fern().with_tag("New")).unwrap();
        assert_eq!(json["id"], "fern");
        assert_eq!(json["numericPrice"], 349.0);
        assert_eq!(json["tag"], "New");
        assert!(json.get("numeric_price").is_none());
    }

    #[test]
    fn test_item_without_tag_omits_field() {
        let json = serde_json::to_value(fern()).unwrap();
        assert!(json.get("tag").is_none());
    }

    #[test]
    fn test_cart_entry_is_flat() {
        let json = r#"{"id":"1","title":"Snake Plant","price":"₹250","image":"/a.png",
            "tag":"Bestseller","numericPrice":250,"quantity":2}"#;
        let entry: CartEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.id().as_str(), "1");
        assert_eq!(entry.quantity.get(), 2);
        assert_eq!(entry.item.tag.as_deref(), Some("Bestseller"));
        assert_eq!(entry.line_total(), Decimal::from(500));

        let back = serde_json::to_value(&entry).unwrap();
        assert_eq!(back["quantity"], 2);
        assert_eq!(back["title"], "Snake Plant");
    }

    #[test]
    fn test_cart_entry_rejects_zero_quantity() {
        let json = r#"{"id":"1","title":"t","price":"p","image":"i","numericPrice":1,"quantity":0}"#;
        assert!(serde_json::from_str::<CartEntry>(json).is_err());
    }

    #[test]
    fn test_high_precision_price_matches_its_stored_form() {
        let item = Item::new(
            ItemId::parse("1").unwrap(),
            "t",
            "p",
            Decimal::from_str("123456789.123456789").unwrap(),
            "i",
        );
        assert_ne!(item.numeric_price, Decimal::from_str("123456789.123456789").unwrap());
        assert_eq!(item.numeric_price.trunc(), Decimal::from(123_456_789));

        let json = serde_json::to_string(&item).unwrap();
        let back: Item = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn test_normalize_price_is_stable() {
        for raw in ["0.1", "349.99", "617.25", "123456789.123456789", "1e20", "-5.5"] {
            let price = Decimal::from_str(raw)
                .or_else(|_| Decimal::from_scientific(raw))
                .unwrap();
            let once = normalize_price(price);
            assert_eq!(normalize_price(once), once, "{raw}");
        }
        assert_eq!(normalize_price(Decimal::new(34999, 2)), Decimal::new(34999, 2));
    }

    #[test]
    fn test_out_of_range_price_is_rejected() {
        let json = r#"{"id":"1","title":"t","price":"p","image":"i","numericPrice":1e300}"#;
        assert!(serde_json::from_str::<Item>(json).is_err());
    }

    #[test]
    fn test_line_total_saturates() {
        let json = r#"{"id":"1","title":"t","price":"p","image":"i",
            "numericPrice":50000000000000000000000000000,"quantity":2}"#;
        let entry: CartEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.line_total(), Decimal::MAX);
    }

    #[test]
    fn test_fractional_price_parses_exactly() {
        let json = r#"{"id":"1","title":"t","price":"p","image":"i","numericPrice":99.5}"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.numeric_price, Decimal::new(995, 1));
    }
}
