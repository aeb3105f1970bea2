//! Catalog and shopping-cart state for a storefront.
//!
//! This crate owns everything a storefront UI reads and mutates:
//!
//! - **Catalog**: products seeded once from a feed, re-seedable on demand
//! - **Cart**: line items, quantities, and totals with tax
//! - **Storefront**: the state container tying both together with the
//!   detail-view and modal selection
//! - **Handle**: a single-writer task for hosts with more than one caller
//!
//! # Example
//!
//! ```rust
//! use storefront_core::prelude::*;
//!
//! let feed = ProductFeed::sample().unwrap();
//! let mut store = Storefront::new(&feed).unwrap();
//!
//! store.add_to_cart(ProductId::new(1)).unwrap();
//! store.increment(ProductId::new(1)).unwrap();
//!
//! assert_eq!(store.totals().subtotal.amount_cents, 2000);
//! assert_eq!(store.totals().total.display(), "$22.00");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod command;
pub mod handle;
pub mod storefront;

pub use error::CommerceError;
pub use ids::ProductId;
pub use money::{Currency, Money};
pub use storefront::{Storefront, StorefrontSnapshot};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::ProductId;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{Catalog, FeedProduct, Product, ProductFeed};

    // Cart
    pub use crate::cart::{Cart, CartTotals, TaxRate};

    // State
    pub use crate::command::{Command, Outcome};
    pub use crate::handle::StorefrontHandle;
    pub use crate::storefront::{Storefront, StorefrontSnapshot};
}
