//! Catalog product type.

use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A product in the catalog, together with its cart fields.
///
/// `in_cart`, `count` and `total` always move together: `in_cart` is true
/// exactly when `count > 0`, and `total == price * count`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    #[serde(default)]
    pub title: String,
    /// Image path or URL.
    #[serde(default)]
    pub img: String,
    /// Unit price.
    pub price: Money,
    /// Manufacturer or brand.
    #[serde(default)]
    pub company: String,
    /// Long description.
    #[serde(default)]
    pub info: String,
    /// Whether a line item for this product is in the cart.
    #[serde(default)]
    pub in_cart: bool,
    /// Quantity in the cart.
    #[serde(default)]
    pub count: u32,
    /// Line total (`price * count`).
    #[serde(default)]
    pub total: Money,
    /// Any other feed fields, passed through untouched.
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

impl Product {
    /// Create a product that is not in the cart.
    pub fn new(id: ProductId, title: impl Into<String>, price: Money) -> Self {
        Self {
            id,
            title: title.into(),
            img: String::new(),
            price,
            company: String::new(),
            info: String::new(),
            in_cart: false,
            count: 0,
            total: Money::zero(price.currency),
            attributes: serde_json::Map::new(),
        }
    }

    /// Set the cart quantity, keeping `in_cart` and `total` in step.
    pub fn set_count(&mut self, count: u32) -> Result<(), CommerceError> {
        let total = self
            .price
            .try_multiply(i64::from(count))
            .ok_or(CommerceError::Overflow)?;
        self.count = count;
        self.total = total;
        self.in_cart = count > 0;
        Ok(())
    }

    /// Return the cart fields to their not-in-cart defaults.
    pub fn reset_cart_fields(&mut self) {
        self.in_cart = false;
        self.count = 0;
        self.total = Money::zero(self.price.currency);
    }

    /// Check the cart-field invariant.
    pub fn is_consistent(&self) -> bool {
        let expected = self.price.try_multiply(i64::from(self.count));
        self.in_cart == (self.count > 0) && expected == Some(self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    #[test]
    fn test_product_creation() {
        let product = Product::new(
            ProductId::new(1),
            "Google Pixel",
            Money::new(1000, Currency::USD),
        );
        assert_eq!(product.id, ProductId::new(1));
        assert!(!product.in_cart);
        assert_eq!(product.count, 0);
        assert!(product.total.is_zero());
        assert!(product.is_consistent());
    }

    #[test]
    fn test_set_count_updates_total() {
        let mut product = Product::new(ProductId::new(1), "Pixel", Money::new(1000, Currency::USD));
        product.set_count(3).unwrap();
        assert!(product.in_cart);
        assert_eq!(product.total.amount_cents, 3000);
        assert!(product.is_consistent());

        product.set_count(0).unwrap();
        assert!(!product.in_cart);
        assert!(product.total.is_zero());
    }

    #[test]
    fn test_set_count_overflow_leaves_product_unchanged() {
        let gold = Money::new(i64::MAX, Currency::USD);
        let mut product = Product::new(ProductId::new(1), "Gold", gold);
        assert_eq!(product.set_count(2), Err(CommerceError::Overflow));
        assert_eq!(product.count, 0);
        assert!(!product.in_cart);
    }

    #[test]
    fn test_reset_cart_fields() {
        let mut product = Product::new(ProductId::new(1), "Pixel", Money::new(1000, Currency::USD));
        product.set_count(2).unwrap();
        product.reset_cart_fields();
        assert!(!product.in_cart);
        assert_eq!(product.count, 0);
        assert!(product.total.is_zero());
    }

    #[test]
    fn test_inconsistent_product_detected() {
        let mut product = Product::new(ProductId::new(1), "Pixel", Money::new(1000, Currency::USD));
        product.count = 2;
        assert!(!product.is_consistent());
    }
}
