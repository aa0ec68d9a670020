//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    549.99 - 499.99 = 50.00000000000006  ❌ WRONG!                       │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    54999 - 49999 = 5000 cents  ✅ exactly $50.00                        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tally_core::money::Money;
//!
//! let price = Money::from_cents(10950); // $109.50
//! let three = price * 3;                // $328.50
//! let parsed = Money::parse_decimal("109.5").unwrap();
//! assert_eq!(parsed, price);
//! assert_eq!(three.cents(), 32850);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use crate::error::ValidationError;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: intermediate totals may dip below zero before a rule
///   clamps them
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Serde**: serialized as the bare integer of cents
///
/// ## Where Money is Used
/// ```text
/// Item.price ──► Cart::base_total() ──► PricingRule::apply() ──► total()
/// ```
///
/// ## Overflow
/// The operators (`+`, `-`, `*`, `Sum`) follow plain `i64` semantics and
/// panic on overflow in debug builds. `Checkout` pricing and the built-in
/// rules use the `checked_*` forms instead and report an error.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// let price = Money::from_cents(54999); // $549.99
    /// assert_eq!(price.cents(), 54999);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units (dollars and cents).
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    /// `from_major_minor(-5, 50)` = -$5.50, not -$4.50
    ///
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_minor(499, 99).cents(), 49999);
    /// assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    /// ```
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Parses a plain decimal amount such as `"109.5"` or `"549.99"`.
    ///
    /// ## Rounding Policy
    /// Amounts with more than two fractional digits are rounded half-up
    /// (away from zero) to whole cents:
    /// ```text
    /// "0.004"  ──►   0 cents
    /// "0.005"  ──►   1 cent
    /// "-1.005" ──► -101 cents
    /// ```
    ///
    /// Accepted shape: optional leading `-`, digits, optional `.` and
    /// digits. At least one digit must be present.
    ///
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// assert_eq!(Money::parse_decimal("30").unwrap().cents(), 3000);
    /// assert_eq!(Money::parse_decimal("109.5").unwrap().cents(), 10950);
    /// assert!(Money::parse_decimal("12,50").is_err());
    /// ```
    pub fn parse_decimal(input: &str) -> Result<Money, ValidationError> {
        let trimmed = input.trim();
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: reason.to_string(),
        };

        let (negative, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        if digits.is_empty() {
            return Err(ValidationError::Required {
                field: "price".to_string(),
            });
        }

        let (whole, frac) = digits.split_once('.').unwrap_or((digits, ""));

        if whole.is_empty() && frac.is_empty() {
            return Err(invalid("must contain at least one digit"));
        }
        if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid("must contain only digits and one decimal point"));
        }

        let major: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid("amount is too large"))?
        };

        let frac = frac.as_bytes();
        let digit = |i: usize| frac.get(i).map_or(0, |b| i64::from(b - b'0'));
        let mut minor = digit(0) * 10 + digit(1);
        if digit(2) >= 5 {
            minor += 1;
        }

        let cents = major
            .checked_mul(100)
            .and_then(|c| c.checked_add(minor))
            .ok_or_else(|| invalid("amount is too large"))?;

        Ok(Money(if negative { -cents } else { cents }))
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    ///
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(-550).cents_part(), 50);
    /// ```
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

    /// Multiplies money by a unit count. `None` on overflow.
    ///
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// let discount = Money::from_cents(10950).checked_mul_quantity(1);
    /// assert_eq!(discount, Some(Money::from_cents(10950)));
    /// assert_eq!(Money::from_cents(i64::MAX).checked_mul_quantity(2), None);
    /// ```
    #[inline]
    pub fn checked_mul_quantity(&self, qty: i64) -> Option<Self> {
        self.0.checked_mul(qty).map(Money)
    }

    /// Addition that returns `None` instead of overflowing.
    #[inline]
    pub fn checked_add(&self, other: Money) -> Option<Self> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Subtraction that returns `None` instead of overflowing.
    #[inline]
    pub fn checked_sub(&self, other: Money) -> Option<Self> {
        self.0.checked_sub(other.0).map(Money)
    }

    /// Sums `amounts`, or `None` if any partial sum overflows.
    ///
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// let prices = [Money::from_cents(10950), Money::from_cents(3000)];
    /// assert_eq!(Money::checked_sum(prices), Some(Money::from_cents(13950)));
    /// assert_eq!(Money::checked_sum([Money::from_cents(i64::MAX), Money::from_cents(1)]), None);
    /// ```
    pub fn checked_sum<I>(amounts: I) -> Option<Self>
    where
        I: IntoIterator<Item = Money>,
    {
        amounts
            .into_iter()
            .try_fold(Money::zero(), |acc, amount| acc.checked_add(amount))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Debug-friendly rendering: `$109.50`, `-$5.50`. No thousands separators.
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

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by a unit count.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
