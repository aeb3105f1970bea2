//! Product seed feed.
//!
//! The feed is the external, read-only input the catalog is seeded from.
//! Prices arrive as decimal amounts and are converted to minor units of the
//! feed currency.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};

const SAMPLE_FEED: &str = include_str!("../../data/products.json");

/// Keys that belong to the cart, not the feed. Dropped on conversion.
const CART_KEYS: [&str; 4] = ["inCart", "in_cart", "count", "total"];

/// A complete seed: products plus the default detail product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductFeed {
    /// Currency every price in the feed is quoted in.
    #[serde(default)]
    pub currency: Currency,
    /// Sellable products, in display order.
    pub products: Vec<FeedProduct>,
    /// Product shown in the detail view before anything is selected.
    #[serde(alias = "detailProduct")]
    pub detail_product: FeedProduct,
}

/// One product record as it appears in the feed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeedProduct {
    pub id: ProductId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub img: String,
    /// Decimal unit price (e.g. `10` or `49.99`).
    pub price: f64,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub info: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl FeedProduct {
    /// Convert into a catalog product priced in `currency`.
    pub fn to_product(&self, currency: Currency) -> Result<Product, CommerceError> {
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(CommerceError::Validation(format!(
                "product {} has invalid price {}",
                self.id, self.price
            )));
        }

        let mut product = Product::new(
            self.id,
            self.title.clone(),
            Money::from_decimal(self.price, currency),
        );
        product.img = self.img.clone();
        product.company = self.company.clone();
        product.info = self.info.clone();
        product.attributes = self
            .extra
            .iter()
            .filter(|(key, _)| !CART_KEYS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        Ok(product)
    }
}

impl ProductFeed {
    /// Parse a feed from JSON.
    pub fn from_json_str(content: &str) -> Result<Self, CommerceError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Parse a feed from TOML.
    pub fn from_toml_str(content: &str) -> Result<Self, CommerceError> {
        Ok(toml::from_str(content)?)
    }

    /// The feed bundled with this crate.
    pub fn sample() -> Result<Self, CommerceError> {
        Self::from_json_str(SAMPLE_FEED)
    }

    /// Convert every feed record into a catalog product.
    pub fn to_products(&self) -> Result<Vec<Product>, CommerceError> {
        self.products
            .iter()
            .map(|item| item.to_product(self.currency))
            .collect()
    }

    /// Convert the default detail record.
    pub fn detail(&self) -> Result<Product, CommerceError> {
        self.detail_product.to_product(self.currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_feed_parses() {
        let feed = ProductFeed::sample().unwrap();
        assert_eq!(feed.currency, Currency::USD);
        assert_eq!(feed.products.len(), 8);

        let products = feed.to_products().unwrap();
        assert_eq!(products[0].price.amount_cents, 1000);
        assert!(products.iter().all(|p| !p.in_cart && p.count == 0));
        assert_eq!(feed.detail().unwrap().id, ProductId::new(1));
    }

    #[test]
    fn test_cart_keys_are_dropped_and_extras_kept() {
        let json = r#"{
            "products": [
                {"id": 4, "title": "Nokia", "price": 12.5, "inCart": true,
                 "count": 3, "total": 37.5, "color": "blue"}
            ],
            "detailProduct": {"id": 4, "price": 12.5}
        }"#;
        let feed = ProductFeed::from_json_str(json).unwrap();
        let product = &feed.to_products().unwrap()[0];

        assert_eq!(product.price.amount_cents, 1250);
        assert!(!product.in_cart);
        assert_eq!(product.count, 0);
        assert_eq!(product.attributes.len(), 1);
        assert_eq!(product.attributes["color"], "blue");
    }

    #[test]
    fn test_toml_feed() {
        let toml = r#"
            currency = "EUR"

            [[products]]
            id = 1
            title = "Lumia"
            price = 9

            [detail_product]
            id = 1
            price = 9
        "#;
        let feed = ProductFeed::from_toml_str(toml).unwrap();
        let products = feed.to_products().unwrap();
        assert_eq!(products[0].price, Money::new(900, Currency::EUR));
    }

    #[test]
    fn test_negative_price_rejected() {
        let json = r#"{"products": [{"id": 1, "price": -2}], "detailProduct": {"id": 1, "price": 1}}"#;
        let feed = ProductFeed::from_json_str(json).unwrap();
        assert!(matches!(
            feed.to_products(),
            Err(CommerceError::Validation(_))
        ));
    }

    #[test]
    fn test_malformed_feed() {
        assert!(matches!(
            ProductFeed::from_json_str("{"),
            Err(CommerceError::Serialization(_))
        ));
    }
}
