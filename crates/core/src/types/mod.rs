//! Core types for Plantomart.
//!
//! This module provides type-safe wrappers for the cart and wishlist domain.

pub mod id;
pub mod item;
pub mod price;
pub mod quantity;

pub use id::{ItemId, ItemIdError};
pub use item::{CartEntry, Item, WishlistEntry, normalize_price};
pub use price::{CurrencyCode, format_amount};
pub use quantity::{Quantity, QuantityError};
