//! Cart line quantity.

use core::fmt;
use core::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Quantity`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum QuantityError {
    /// The input string is empty.
    #[error("quantity cannot be empty")]
    Empty,
    /// The input is not a whole number.
    #[error("quantity must be a whole number")]
    NotANumber,
    /// The input is zero or negative.
    #[error("quantity must be at least 1")]
    BelowMinimum,
}

/// Number of units of one product in the cart.
///
/// A quantity is always at least 1; a line item that would drop to zero is
/// removed instead. Views build a `Quantity` from user input with
/// [`Quantity::parse`] and silently ignore anything it rejects, so the cart
/// store never sees an invalid value.
///
/// ```
/// use keeg_store_core::Quantity;
///
/// assert_eq!(Quantity::parse("3").map(Quantity::get), Ok(3));
/// assert!(Quantity::parse("0").is_err());
/// assert!(Quantity::parse("abc").is_err());
/// assert!(Quantity::ONE.decrement().is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quantity(NonZeroU32);

impl Quantity {
    /// A single unit.
    pub const ONE: Self = Self(NonZeroU32::MIN);

    /// Create a quantity, returning `None` for zero.
    #[must_use]
    pub const fn new(value: u32) -> Option<Self> {
        match NonZeroU32::new(value) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }

    /// Parse a quantity from form input.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, not an integer, or below 1.
    pub fn parse(s: &str) -> Result<Self, QuantityError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(QuantityError::Empty);
        }

        let value = s.parse::<i64>().map_err(|_| QuantityError::NotANumber)?;
        if value < 1 {
            return Err(QuantityError::BelowMinimum);
        }

        // Anything past u32::MAX is still "at least one"; saturate.
        let value = u32::try_from(value).unwrap_or(u32::MAX);
        Self::new(value).ok_or(QuantityError::BelowMinimum)
    }

    /// The numeric value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// One more unit, saturating at `u32::MAX`.
    #[must_use]
    pub const fn increment(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// One fewer unit, or `None` when that would fall below 1.
    #[must_use]
    pub const fn decrement(self) -> Option<Self> {
        Self::new(self.0.get() - 1)
    }

    /// Sum of two quantities, saturating at `u32::MAX`.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0.get()))
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for Quantity {
    type Error = QuantityError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(QuantityError::BelowMinimum)
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.get()
    }
}

impl std::str::FromStr for Quantity {
    type Err = QuantityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
