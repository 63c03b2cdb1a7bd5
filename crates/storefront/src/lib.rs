//! Plantomart Storefront - cart and wishlist state.
//!
//! # Architecture
//!
//! - [`storage`] - Origin-scoped key/value storage with cross-tab change events
//! - [`store`] - Typed, fail-open persistence of each list under its own key
//! - [`notifier`] - Same-tab update events and merged subscriptions
//! - [`tab`] - Cart and wishlist services for one browsing context
//! - [`consumer`] - Mounted component state: lists, badges, subtotal, panels
//!
//! An [`Origin`] is constructed once at startup; each tab opened on it gets
//! its own [`Tab`], which is passed by reference to the consumers mounted in
//! that tab.
//!
//! ```
//! use plantomart_core::{Item, ItemId};
//! use plantomart_storefront::{Origin, StorefrontConfig};
//! use rust_decimal::Decimal;
//!
//! let origin = Origin::in_memory(StorefrontConfig::default());
//! let tab = origin.open_tab();
//! let mut navbar = tab.mount();
//!
//! let fern = Item::new(
//!     ItemId::parse("fern")?,
//!     "Boston Fern",
//!     "₹349",
//!     Decimal::from(349),
//!     "/fern.png",
//! );
//! tab.cart().add(fern)?;
//!
//! navbar.refresh();
//! assert_eq!(navbar.cart_badge().as_deref(), Some("1"));
//! assert_eq!(navbar.subtotal_display(), "₹349");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod consumer;
pub mod error;
pub mod notifier;
pub mod panels;
pub mod storage;
pub mod store;
pub mod tab;

pub use config::{ConfigError, StorageKeys, StorefrontConfig};
pub use consumer::Consumer;
pub use error::{StorageError, StoreError};
pub use notifier::{ListEvent, Notifier, Subscription};
pub use panels::{Overlay, PanelState};
pub use storage::{FileBackend, LocalStorage, MemoryBackend, Origin, StorageBackend, TabId};
pub use store::{ListKind, ListStore, StoredList};
pub use tab::{CartStore, ListService, Tab, WishlistStore};
