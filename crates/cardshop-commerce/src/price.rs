//! Local-currency prices.
//!
//! Inventory costs are recorded in USD and converted once, at catalog
//! assembly, with a process-wide fixed rate. Stored prices keep full
//! precision; rounding to whole units happens only for display.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul};

/// Default USD to local-currency conversion rate.
pub const DEFAULT_EXCHANGE_RATE: f64 = 1000.0;

/// Fixed conversion rate from USD to the local currency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExchangeRate(f64);

impl ExchangeRate {
    /// Create a rate. Non-finite or negative rates fall back to the default.
    pub fn new(rate: f64) -> Self {
        if rate.is_finite() && rate >= 0.0 {
            Self(rate)
        } else {
            Self(DEFAULT_EXCHANGE_RATE)
        }
    }

    /// Get the raw multiplier.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Convert a USD amount to a local price.
    pub fn convert(&self, usd: f64) -> Price {
        Price::new(usd * self.0)
    }
}

impl Default for ExchangeRate {
    fn default() -> Self {
        Self(DEFAULT_EXCHANGE_RATE)
    }
}

/// A price in the local currency.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Price(f64);

impl Price {
    /// Create a price from a local-currency amount.
    pub fn new(amount: f64) -> Self {
        Self(amount)
    }

    /// Zero price.
    pub fn zero() -> Self {
        Self(0.0)
    }

    /// Get the unrounded amount.
    pub fn amount(&self) -> f64 {
        self.0
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }

    /// Amount rounded to whole currency units, for display.
    pub fn rounded(&self) -> i64 {
        self.0.round() as i64
    }

    /// Multiply by a quantity.
    pub fn times(&self, quantity: u32) -> Price {
        Price(self.0 * f64::from(quantity))
    }
}

impl Add for Price {
    type Output = Price;

    fn add(self, other: Price) -> Price {
        Price(self.0 + other.0)
    }
}

impl Mul<u32> for Price {
    type Output = Price;

    fn mul(self, quantity: u32) -> Price {
        self.times(quantity)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Price>>(iter: I) -> Price {
        iter.fold(Price::zero(), |acc, p| acc + p)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.rounded())
    }
}
