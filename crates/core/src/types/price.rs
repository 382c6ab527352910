//! Type-safe price representation using decimal arithmetic.
//!
//! Prices travel as plain JSON numbers (`109.95`) both from the catalog API
//! and in the persisted cart blob. Decoding also accepts decimal strings
//! (`"109.95"`) and rejects negative amounts. No currency is attached: the
//! storefront renders amounts with two decimal places and nothing else.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::Quantity;

/// A non-negative monetary amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(Decimal);

impl Price {
    /// Zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    ///
    /// Returns `None` for negative amounts.
    #[must_use]
    pub fn new(amount: Decimal) -> Option<Self> {
        if amount.is_sign_negative() && !amount.is_zero() {
            None
        } else {
            Some(Self(amount))
        }
    }

    /// Create a price from a whole number of cents.
    ///
    /// Negative input is clamped to zero.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents.max(0), 2))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Price of `quantity` units, saturating at [`Decimal::MAX`].
    #[must_use]
    pub fn times(self, quantity: Quantity) -> Self {
        Self(
            self.0
                .checked_mul(Decimal::from(quantity.get()))
                .unwrap_or(Decimal::MAX),
        )
    }

    /// Round to two decimal places (banker's rounding, as `Decimal` does).
    #[must_use]
    pub fn rounded(self) -> Self {
        Self(self.0.round_dp(2))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Saturates at [`Decimal::MAX`]; both sides are non-negative.
impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.checked_add(rhs.0).unwrap_or(Decimal::MAX))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0.to_f64() {
            Some(value) => serializer.serialize_f64(value),
            None => serializer.serialize_str(&self.0.to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PriceVisitor)
    }
}

struct PriceVisitor;

impl PriceVisitor {
    fn checked<E: de::Error>(amount: Decimal) -> Result<Price, E> {
        Price::new(amount).ok_or_else(|| E::custom("price cannot be negative"))
    }
}

impl Visitor<'_> for PriceVisitor {
    type Value = Price;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a non-negative decimal number or numeric string")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Price, E> {
        Self::checked(Decimal::from(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Price, E> {
        Self::checked(Decimal::from(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Price, E> {
        // `f64`'s Display is the shortest round-trip form, so 9.99 stays 9.99.
        let amount = Decimal::from_str(&v.to_string()).map_err(E::custom)?;
        Self::checked(amount)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Price, E> {
        let amount = Decimal::from_str(v.trim()).map_err(E::custom)?;
        Self::checked(amount)
    }
}
