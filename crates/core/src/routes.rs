//! Navigation targets and the featured collections grid.
//!
//! Routing itself lives in the host application; these are only the paths
//! and static content the navigation bar and home page refer to.

use core::fmt;

/// Pages the navigation bar links to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Cart,
    Wishlist,
    Checkout,
    Products,
    Account,
}

impl Route {
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Cart => "/cart",
            Self::Wishlist => "/wishlist",
            Self::Checkout => "/checkout",
            Self::Products => "/products",
            Self::Account => "/account",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// A category tile on the home page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeaturedCollection {
    pub title: &'static str,
    pub image: &'static str,
    pub description: &'static str,
}

const FEATURED_COLLECTIONS: [FeaturedCollection; 4] = [
    FeaturedCollection {
        title: "Indoor Plants",
        image: "/assets/indoor_plants.png",
        description: "Perfect for purifying air and adding natural beauty",
    },
    FeaturedCollection {
        title: "Outdoor Plants",
        image: "/assets/outdoor_plants.png",
        description: "Transform your garden into a vibrant ecosystem",
    },
    FeaturedCollection {
        title: "Eco-friendly Planters",
        image: "/assets/eco-friendly-features.png",
        description: "Sustainable containers for your green companions",
    },
    FeaturedCollection {
        title: "Green Essentials",
        image: "/assets/green_essentials_oil.png",
        description: "Plant-based products for a sustainable lifestyle",
    },
];

/// The collections shown in the "Discover Our Collections" grid, in order.
#[must_use]
pub const fn featured_collections() -> &'static [FeaturedCollection] {
    &FEATURED_COLLECTIONS
}
