//! Cart totals and tax.

use crate::cart::Cart;
use crate::error::CommerceError;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Basis points in one whole (100%).
const BASIS_POINTS_PER_UNIT: i64 = 10_000;

/// A sales tax rate, held in basis points (1/100 of a percent).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaxRate {
    basis_points: u32,
}

impl TaxRate {
    /// The storefront's flat 10% rate.
    pub const DEFAULT: TaxRate = TaxRate::from_basis_points(1_000);

    /// Create a rate from basis points (`1_000` is 10%).
    pub const fn from_basis_points(basis_points: u32) -> Self {
        Self { basis_points }
    }

    /// Create a rate from a fraction between 0 and 1 (`0.10` is 10%).
    pub fn from_fraction(rate: f64) -> Result<Self, CommerceError> {
        if !rate.is_finite() || !(0.0..=1.0).contains(&rate) {
            return Err(CommerceError::Validation(format!(
                "tax rate must be between 0 and 1, got {rate}"
            )));
        }
        let basis_points = (rate * BASIS_POINTS_PER_UNIT as f64).round() as u32;
        Ok(Self::from_basis_points(basis_points))
    }

    pub fn basis_points(&self) -> u32 {
        self.basis_points
    }

    pub fn as_fraction(&self) -> f64 {
        f64::from(self.basis_points) / BASIS_POINTS_PER_UNIT as f64
    }

    /// Tax owed on `amount`, rounded to the nearest minor unit (half away
    /// from zero).
    pub fn tax_on(&self, amount: Money) -> Result<Money, CommerceError> {
        let scaled = amount
            .amount_cents
            .checked_mul(i64::from(self.basis_points))
            .ok_or(CommerceError::Overflow)?;

        let mut cents = scaled / BASIS_POINTS_PER_UNIT;
        let remainder = scaled % BASIS_POINTS_PER_UNIT;
        if remainder.abs() * 2 >= BASIS_POINTS_PER_UNIT {
            cents += scaled.signum();
        }
        Ok(Money::new(cents, amount.currency))
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Derived cart totals. Only ever produced by [`CartTotals::compute`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartTotals {
    /// Sum of line item totals.
    pub subtotal: Money,
    /// Tax on the subtotal.
    pub tax: Money,
    /// Subtotal plus tax.
    pub total: Money,
}

impl CartTotals {
    /// Totals of an empty cart.
    pub fn zero(currency: Currency) -> Self {
        Self {
            subtotal: Money::zero(currency),
            tax: Money::zero(currency),
            total: Money::zero(currency),
        }
    }

    /// Compute totals for `cart`.
    ///
    /// Every line item must be priced in `currency`.
    pub fn compute(cart: &Cart, rate: TaxRate, currency: Currency) -> Result<Self, CommerceError> {
        if let Some(stray) = cart.items().iter().find(|i| i.total.currency != currency) {
            return Err(CommerceError::CurrencyMismatch {
                expected: currency.code().to_string(),
                got: stray.total.currency.code().to_string(),
            });
        }

        let subtotal = Money::try_sum(cart.items().iter().map(|i| &i.total), currency)
            .ok_or(CommerceError::Overflow)?;
        let tax = rate.tax_on(subtotal)?;
        let total = subtotal.try_add(&tax).ok_or(CommerceError::Overflow)?;

        Ok(Self {
            subtotal,
            tax,
            total,
        })
    }

    /// Check if all amounts are zero.
    pub fn is_zero(&self) -> bool {
        self.subtotal.is_zero() && self.tax.is_zero() && self.total.is_zero()
    }
}
