//! Product Catalog
//!
//! The fixed, in-memory product lists shown in the shop carousel and the
//! stylist's "Recommended for You" panel. Loaded at startup, never mutated.

use std::num::NonZeroUsize;

/// A product card
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Product {
    /// Stable identifier, unique within its list
    pub id: u32,
    /// Display name
    pub name: &'static str,
    /// Pre-formatted price
    pub price: &'static str,
    /// Image reference (placeholder path)
    pub image: &'static str,
}

/// Products cycled by the shop carousel
pub const SHOWCASE: [Product; 5] = [
    Product {
        id: 1,
        name: "Summer Dress",
        price: "$49.99",
        image: "/placeholder.svg?height=300&width=300",
    },
    Product {
        id: 2,
        name: "Casual Jeans",
        price: "$39.99",
        image: "/placeholder.svg?height=300&width=300",
    },
    Product {
        id: 3,
        name: "Elegant Blouse",
        price: "$29.99",
        image: "/placeholder.svg?height=300&width=300",
    },
    Product {
        id: 4,
        name: "Formal Suit",
        price: "$99.99",
        image: "/placeholder.svg?height=300&width=300",
    },
    Product {
        id: 5,
        name: "Winter Coat",
        price: "$79.99",
        image: "/placeholder.svg?height=300&width=300",
    },
];

/// Number of showcase products
pub const SHOWCASE_LEN: NonZeroUsize = match NonZeroUsize::new(SHOWCASE.len()) {
    Some(len) => len,
    None => panic!("showcase must not be empty"),
};

/// Items suggested next to the stylist chat
pub const RECOMMENDED: [Product; 3] = [
    Product {
        id: 1,
        name: "Striped T-Shirt",
        price: "$24.99",
        image: "/placeholder.svg?height=150&width=150",
    },
    Product {
        id: 2,
        name: "Denim Jacket",
        price: "$59.99",
        image: "/placeholder.svg?height=150&width=150",
    },
    Product {
        id: 3,
        name: "Black Pants",
        price: "$34.99",
        image: "/placeholder.svg?height=150&width=150",
    },
];

/// Length of a product list as a non-zero count, if it has any products
#[must_use]
pub fn product_count(products: &[Product]) -> Option<NonZeroUsize> {
    NonZeroUsize::new(products.len())
}
