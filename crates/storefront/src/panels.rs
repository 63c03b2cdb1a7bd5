//! Overlay panels of the navigation bar: mobile menu, cart drawer and
//! wishlist drawer.

/// The overlay currently covering the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Menu,
    Cart,
    Wishlist,
}

/// Open/closed state of each panel.
///
/// Opening a drawer closes the other drawer and the menu, so at most one
/// overlay is visible after any drawer toggle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PanelState {
    menu: bool,
    vendor: bool,
    cart: bool,
    wishlist: bool,
}

impl PanelState {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            menu: false,
            vendor: false,
            cart: false,
            wishlist: false,
        }
    }

    /// Flip the mobile menu. Closing it also closes both drawers.
    pub const fn toggle_menu(&mut self) {
        if self.menu {
            self.cart = false;
            self.wishlist = false;
        }
        self.menu = !self.menu;
    }

    /// Flip the vendor submenu inside the mobile menu.
    pub const fn toggle_vendor(&mut self) {
        self.vendor = !self.vendor;
    }

    /// Flip the cart drawer, closing the wishlist drawer and the menu.
    pub const fn toggle_cart(&mut self) {
        self.cart = !self.cart;
        self.wishlist = false;
        self.menu = false;
    }

    /// Flip the wishlist drawer, closing the cart drawer and the menu.
    pub const fn toggle_wishlist(&mut self) {
        self.wishlist = !self.wishlist;
        self.cart = false;
        self.menu = false;
    }

    pub const fn close_all(&mut self) {
        self.menu = false;
        self.cart = false;
        self.wishlist = false;
    }

    #[must_use]
    pub const fn is_menu_open(&self) -> bool {
        self.menu
    }

    #[must_use]
    pub const fn is_vendor_open(&self) -> bool {
        self.vendor
    }

    #[must_use]
    pub const fn is_cart_open(&self) -> bool {
        self.cart
    }

    #[must_use]
    pub const fn is_wishlist_open(&self) -> bool {
        self.wishlist
    }

    /// Page scrolling is disabled while any overlay is open.
    #[must_use]
    pub const fn scroll_locked(&self) -> bool {
        self.menu || self.cart || self.wishlist
    }

    /// The visible overlay. Drawers sit above the menu.
    #[must_use]
    pub const fn open(&self) -> Option<Overlay> {
        if self.cart {
            Some(Overlay::Cart)
        } else if self.wishlist {
            Some(Overlay::Wishlist)
        } else if self.menu {
            Some(Overlay::Menu)
        } else {
            None
        }
    }
}
