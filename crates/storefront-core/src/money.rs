//! # Prices
//!
//! Prices are whole cents end to end: typed as dollars at the console,
//! stored in `price_per_unit_cents INTEGER`, printed as `$x.yy`.
//!
//! ```text
//! "Enter the new price per unit: 2.5"
//!        │ Money::parse
//!        ▼
//!     Money(250) ──► products.price_per_unit_cents = 250
//!        │ Display
//!        ▼
//!     "$2.50"
//! ```
//!
//! ```rust
//! use storefront_core::money::Money;
//!
//! let pepsi = Money::parse("$1.99").unwrap();
//! assert_eq!((pepsi * 3).to_string(), "$5.97");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Sub};

use crate::error::ValidationError;

/// An amount in cents. Never negative once it has passed `parse` or the
/// price validator.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(transparent))]
pub struct Money(i64);

impl Money {
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Price of `units` units, or `None` past `i64` cents.
    #[inline]
    pub const fn checked_mul(self, units: i64) -> Option<Money> {
        match self.0.checked_mul(units) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Parses a dollar amount typed at the console.
    ///
    /// ```text
    /// "12"    → 1200        "$0.99" →   99
    /// "12.5"  → 1250        ".75"   →   75
    /// "12.50" → 1250        "7."    →  700
    /// ```
    ///
    /// Signs, thousands separators and a third decimal are rejected.
    pub fn parse(input: &str) -> Result<Money, ValidationError> {
        let text = input.trim();
        let text = text.strip_prefix('$').unwrap_or(text);
        if text.is_empty() {
            return Err(ValidationError::required("price"));
        }

        let (whole, frac) = text.split_once('.').unwrap_or((text, ""));
        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());

        if whole.is_empty() && frac.is_empty() {
            return Err(ValidationError::invalid_format("price", "no digits"));
        }
        if !all_digits(whole) || !all_digits(frac) {
            return Err(ValidationError::invalid_format(
                "price",
                "must be a non-negative amount like 12.50",
            ));
        }
        if frac.len() > 2 {
            return Err(ValidationError::invalid_format(
                "price",
                "at most two decimal places",
            ));
        }

        let too_large = || ValidationError::invalid_format("price", "amount too large");

        // Right-pad the fraction: "5" means 50 cents
        let cents = format!("{frac:0<2}").parse::<i64>().map_err(|_| too_large())?;
        let dollars = match whole {
            "" => 0,
            digits => digits.parse::<i64>().map_err(|_| too_large())?,
        };

        dollars
            .checked_mul(100)
            .and_then(|d| d.checked_add(cents))
            .map(Money)
            .ok_or_else(too_large)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}${}.{:02}", abs / 100, abs % 100)
    }
}

// The operators saturate at the i64 bounds. Validated prices and unit
// counts never get there; use `checked_mul` where the inputs are unchecked.

impl Add for Money {
    type Output = Money;

    #[inline]
    fn add(self, other: Money) -> Money {
        Money(self.0.saturating_add(other.0))
    }
}

impl Sub for Money {
    type Output = Money;

    #[inline]
    fn sub(self, other: Money) -> Money {
        Money(self.0.saturating_sub(other.0))
    }
}

/// Price of several units.
impl Mul<i64> for Money {
    type Output = Money;

    #[inline]
    fn mul(self, units: i64) -> Money {
        Money(self.0.saturating_mul(units))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), |total, line| total + line)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}
