//! Plantomart Core - Shared cart and wishlist types.
//!
//! This crate provides the domain model used by every Plantomart component:
//! - `storefront` - Persisted cart/wishlist store, notifier and consumers
//! - `cli` - Command-line tools for inspecting and editing the lists
//!
//! # Architecture
//!
//! The core crate contains only types and pure transforms - no storage, no
//! event channels, no logging. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Item ids, quantities, catalog items and price formatting
//! - [`cart`] - Cart list and its transforms
//! - [`wishlist`] - Wishlist list and its transforms
//! - [`list`] - Behaviour shared by both list kinds
//! - [`display`] - Badge counts
//! - [`routes`] - Navigation targets and featured collections

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod display;
pub mod list;
pub mod routes;
pub mod types;
pub mod wishlist;

pub use cart::CartList;
pub use display::{BADGE_CAP, badge, display_count, display_count_capped};
pub use list::{EntryList, ListError};
pub use routes::{FeaturedCollection, Route, featured_collections};
pub use types::*;
pub use wishlist::WishlistList;
