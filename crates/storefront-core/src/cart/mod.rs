//! Shopping cart module.
//!
//! Contains the cart, its line items and totals computation.

mod cart;
mod pricing;

pub use cart::Cart;
pub use pricing::{CartTotals, TaxRate};
