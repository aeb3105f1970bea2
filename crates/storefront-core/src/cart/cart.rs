//! Cart and line items.
//!
//! A line item is an owned copy of the catalog product, never a reference to
//! it. Every method validates before it touches `items`, so a failed call
//! leaves the cart exactly as it was.

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// A shopping cart: line items in the order they were first added.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    items: Vec<Product>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Line items in add order.
    pub fn items(&self) -> &[Product] {
        &self.items
    }

    /// Get a line item by product id.
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Check whether a product has a line item.
    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Get total item count (sum of quantities).
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.count)).sum()
    }

    /// Get number of unique items.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Put a product in the cart at quantity 1.
    ///
    /// A product that already has a line item is reset to quantity 1 in
    /// place rather than added twice. Returns the line item.
    pub fn add(&mut self, product: &Product) -> Result<&Product, CommerceError> {
        let mut line = product.clone();
        line.set_count(1)?;

        let index = match self.items.iter().position(|i| i.id == product.id) {
            Some(index) => {
                self.items[index] = line;
                index
            }
            None => {
                self.items.push(line);
                self.items.len() - 1
            }
        };
        Ok(&self.items[index])
    }

    /// Set the quantity of an existing line item.
    ///
    /// The quantity must be at least 1; use [`Cart::remove`] to take an
    /// item out.
    pub fn set_count(&mut self, id: ProductId, count: u32) -> Result<&Product, CommerceError> {
        if count == 0 {
            return Err(CommerceError::Validation(
                "line item quantity must be at least 1".to_string(),
            ));
        }

        let item = self
            .items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(CommerceError::ItemNotInCart(id))?;
        item.set_count(count)?;
        Ok(item)
    }

    /// Remove a line item, returning it.
    pub fn remove(&mut self, id: ProductId) -> Result<Product, CommerceError> {
        let index = self
            .items
            .iter()
            .position(|i| i.id == id)
            .ok_or(CommerceError::ItemNotInCart(id))?;
        Ok(self.items.remove(index))
    }

    /// Clear all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::{Currency, Money};

    fn product(id: u64, cents: i64) -> Product {
        let price = Money::new(cents, Currency::USD);
        Product::new(ProductId::new(id), format!("Product {id}"), price)
    }

    #[test]
    fn test_cart_creation() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_add_item() {
        let mut cart = Cart::new();
        let line = cart.add(&product(1, 1000)).unwrap();
        assert!(line.in_cart);
        assert_eq!(line.count, 1);
        assert_eq!(line.total.amount_cents, 1000);
        assert_eq!(cart.unique_item_count(), 1);
    }

    #[test]
    fn test_add_same_item_resets_quantity() {
        let mut cart = Cart::new();
        cart.add(&product(1, 1000)).unwrap();
        cart.add(&product(2, 500)).unwrap();
        cart.set_count(ProductId::new(1), 4).unwrap();

        cart.add(&product(1, 1000)).unwrap();

        assert_eq!(cart.unique_item_count(), 2);
        assert_eq!(cart.get(ProductId::new(1)).unwrap().count, 1);
        // Position is kept.
        assert_eq!(cart.items()[0].id, ProductId::new(1));
    }

    #[test]
    fn test_line_item_is_a_copy() {
        let mut cart = Cart::new();
        let mut source = product(1, 1000);
        cart.add(&source).unwrap();
        source.title = "Renamed".to_string();
        assert_eq!(cart.get(ProductId::new(1)).unwrap().title, "Product 1");
    }

    #[test]
    fn test_set_count() {
        let mut cart = Cart::new();
        cart.add(&product(1, 250)).unwrap();
        let line = cart.set_count(ProductId::new(1), 3).unwrap();
        assert_eq!(line.total.amount_cents, 750);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_set_count_rejects_bad_quantities() {
        let mut cart = Cart::new();
        cart.add(&product(1, 250)).unwrap();

        assert!(cart.set_count(ProductId::new(1), 0).is_err());
        assert_eq!(
            cart.set_count(ProductId::new(9), 2).unwrap_err(),
            CommerceError::ItemNotInCart(ProductId::new(9))
        );
        assert_eq!(cart.get(ProductId::new(1)).unwrap().count, 1);
    }

    #[test]
    fn test_set_count_has_no_upper_cap() {
        let mut cart = Cart::new();
        cart.add(&product(1, 1)).unwrap();
        let line = cart.set_count(ProductId::new(1), 1_000_000).unwrap();
        assert_eq!(line.total.amount_cents, 1_000_000);
    }

    #[test]
    fn test_set_count_overflow_leaves_line_untouched() {
        let mut cart = Cart::new();
        cart.add(&product(1, i64::MAX / 2 + 1)).unwrap();
        assert_eq!(
            cart.set_count(ProductId::new(1), 2).unwrap_err(),
            CommerceError::Overflow
        );
        assert_eq!(cart.get(ProductId::new(1)).unwrap().count, 1);
    }

    #[test]
    fn test_remove_item() {
        let mut cart = Cart::new();
        cart.add(&product(1, 1000)).unwrap();
        let removed = cart.remove(ProductId::new(1)).unwrap();
        assert_eq!(removed.id, ProductId::new(1));
        assert!(cart.is_empty());
        assert!(cart.remove(ProductId::new(1)).is_err());
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add(&product(1, 1000)).unwrap();
        cart.add(&product(2, 1000)).unwrap();
        cart.clear();
        assert!(cart.is_empty());
    }
}
