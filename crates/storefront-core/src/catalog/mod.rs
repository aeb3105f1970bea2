//! Product catalog module.
//!
//! Contains the product type, the seed feed and the catalog store.

mod feed;
mod product;
mod store;

pub use feed::{FeedProduct, ProductFeed};
pub use product::Product;
pub use store::Catalog;
