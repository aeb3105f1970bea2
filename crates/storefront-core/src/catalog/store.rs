//! The catalog store: seeded once per session, re-seedable from its own
//! pristine copy of the feed.

use std::collections::HashSet;

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;

/// Per-session product collection.
///
/// Keeps two independent copies of the feed: `seed`, which is never mutated,
/// and `products`, the working copy the cart manager updates.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    seed: Vec<Product>,
    products: Vec<Product>,
}

impl Catalog {
    /// Deep-copy a feed into a new catalog.
    ///
    /// Cart fields of every product are reset to their not-in-cart defaults.
    /// Fails on duplicate ids or negative prices.
    pub fn initialize(feed: &[Product]) -> Result<Self, CommerceError> {
        let mut seen = HashSet::with_capacity(feed.len());
        let mut seed = Vec::with_capacity(feed.len());

        for item in feed {
            if !seen.insert(item.id) {
                return Err(CommerceError::Validation(format!(
                    "duplicate product id {} in feed",
                    item.id
                )));
            }
            if item.price.is_negative() {
                return Err(CommerceError::Validation(format!(
                    "product {} has a negative price",
                    item.id
                )));
            }
            let mut product = item.clone();
            product.reset_cart_fields();
            seed.push(product);
        }

        tracing::info!(products = seed.len(), "catalog seeded");

        Ok(Self {
            products: seed.clone(),
            seed,
        })
    }

    /// Look up the current state of a product.
    pub fn lookup(&self, id: ProductId) -> Result<&Product, CommerceError> {
        self.get(id).ok_or(CommerceError::ProductNotFound(id))
    }

    /// Get a product by id, if present.
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Check whether a product id is in the catalog.
    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    /// All products in feed order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Swap in a modified copy of a product.
    pub fn replace(&mut self, product: Product) -> Result<(), CommerceError> {
        let slot = self
            .products
            .iter_mut()
            .find(|p| p.id == product.id)
            .ok_or(CommerceError::ProductNotFound(product.id))?;
        *slot = product;
        Ok(())
    }

    /// Replace every working product with a fresh copy of the seed.
    pub fn reseed(&mut self) {
        self.products = self.seed.clone();
        tracing::info!(products = self.products.len(), "catalog re-seeded");
    }
}
