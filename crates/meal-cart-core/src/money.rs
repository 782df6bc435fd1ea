//! # Money Module
//!
//! Provides the `Money` type used for meal prices.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  The listing backend sends prices as decimal strings ("12.99").         │
//! │  Summing them as floats drifts:                                        │
//! │    12.99 + 0.01 * 3 = 13.020000000000001  ❌                            │
//! │                                                                         │
//! │  OUR SOLUTION: parse once into integer cents, never touch floats       │
//! │    "12.99" → 1299 cents                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart never computes prices. `Money` is carried through the reducer
//! untouched and only summed for display (`CartState::total_price`).
//!
//! ## Usage
//! ```rust
//! use meal_cart_core::money::Money;
//!
//! let price = Money::parse_decimal("12.99").unwrap();
//! assert_eq!(price.cents(), 1299);
//! assert_eq!((price * 2).to_string(), "$25.98");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: matches the listing's integer price column and keeps
///   sums from wrapping silently
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Serialized as a bare integer**: `{"price": 1299}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use meal_cart_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Parses a decimal price string such as `"12.99"`, `"9"` or `"0.5"`.
    ///
    /// At most two fractional digits are accepted; surrounding whitespace is
    /// ignored. A leading `-` is accepted so that validation, not parsing,
    /// decides whether negative prices are allowed.
    ///
    /// ## Example
    /// ```rust
    /// use meal_cart_core::money::Money;
    ///
    /// assert_eq!(Money::parse_decimal("9").unwrap().cents(), 900);
    /// assert_eq!(Money::parse_decimal("0.5").unwrap().cents(), 50);
    /// assert!(Money::parse_decimal("1.999").is_err());
    /// assert!(Money::parse_decimal("abc").is_err());
    /// ```
    pub fn parse_decimal(input: &str) -> Result<Self, ValidationError> {
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: reason.to_string(),
        };

        let trimmed = input.trim();
        let (negative, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let (whole, frac) = match digits.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (digits, ""),
        };

        if whole.is_empty() && frac.is_empty() {
            return Err(invalid("must contain digits"));
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid("must be a decimal number like 12.99"));
        }
        if frac.len() > 2 {
            return Err(invalid("must have at most two decimal places"));
        }

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid("is too large"))?
        };
        let frac: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| invalid("is too large"))? * 10,
            _ => frac.parse().map_err(|_| invalid("is too large"))?,
        };

        let cents = whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(frac))
            .ok_or_else(|| invalid("is too large"))?;

        Ok(Money(if negative { -cents } else { cents }))
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies a unit price by a line quantity, saturating at the `i64`
    /// bounds instead of overflowing.
    ///
    /// ## Example
    /// ```rust
    /// use meal_cart_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(1299); // $12.99
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 3897);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.saturating_mul(qty as i64))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Renders as `$12.99`; the UI handles localization.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Saturating, like every `Money` operator: a display total pins at the
/// `i64` bounds rather than panicking.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

/// Multiplication by a line quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(Money::parse_decimal("12.99").unwrap().cents(), 1299);
        assert_eq!(Money::parse_decimal(" 16.50 ").unwrap().cents(), 1650);
        assert_eq!(Money::parse_decimal("9").unwrap().cents(), 900);
        assert_eq!(Money::parse_decimal("9.").unwrap().cents(), 900);
        assert_eq!(Money::parse_decimal(".5").unwrap().cents(), 50);
        assert_eq!(Money::parse_decimal("-1.25").unwrap().cents(), -125);
    }

    #[test]
    fn test_parse_decimal_rejects_garbage() {
        assert!(Money::parse_decimal("").is_err());
        assert!(Money::parse_decimal(".").is_err());
        assert!(Money::parse_decimal("12,99").is_err());
        assert!(Money::parse_decimal("1.234").is_err());
        assert!(Money::parse_decimal("$5").is_err());
        assert!(Money::parse_decimal("99999999999999999999").is_err());
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a * 3).cents(), 3000);

        let mut total = Money::zero();
        total += b;
        assert_eq!(total, b);
    }

    #[test]
    fn test_sum() {
        let total: Money = [100, 250, 1299]
            .into_iter()
            .map(Money::from_cents)
            .sum();
        assert_eq!(total.cents(), 1649);
        assert!(std::iter::empty::<Money>().sum::<Money>().is_zero());
    }

    #[test]
    fn test_arithmetic_saturates() {
        let huge = Money::from_cents(i64::MAX / 2 + 1);

        assert_eq!((huge * 2).cents(), i64::MAX);
        assert_eq!((huge + huge).cents(), i64::MAX);
        assert_eq!(Money::from_cents(i64::MIN) * 3, Money::from_cents(i64::MIN));

        let mut total = huge;
        total += huge;
        assert_eq!(total.cents(), i64::MAX);

        let total: Money = [huge, huge, huge].into_iter().sum();
        assert_eq!(total.cents(), i64::MAX);
    }
}
