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
//! │    1.50 × 0.9 × 3 = 4.050000000000001  ❌ WRONG!                        │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    150 cents - 15 cents discount = 135 cents (×3 = 405 cents)          │
//! │    Rounding happens once, at the discount step, and is explicit        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use vend_core::money::Money;
//!
//! let price = Money::from_cents(150); // $1.50
//!
//! let tripled = price * 3;                      // $4.50
//! let total = tripled + Money::from_cents(100); // $5.50
//! assert_eq!(total.to_string(), "$5.50");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use crate::types::DiscountRate;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in cents.
///
/// ## Design Decisions
/// - **i64 (signed)**: differences between amounts may go negative
/// - **Single field tuple struct**: Zero-cost abstraction over i64
///
/// ## Where Money is Used
/// ```text
/// Product.price_cents ──► effective_price() ──► ReceiptLine.line_total
///                                                     │
///                    Session.total() ◄────────────────┘
///                          │
///                          ▼
///                SalesLedger.total_sales
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use vend_core::money::Money;
    ///
    /// let price = Money::from_cents(150); // Represents $1.50
    /// assert_eq!(price.cents(), 150);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the dollars portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
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

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use vend_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(150);
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 450);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Multiplies money by a quantity, returning `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use vend_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(150).checked_mul_quantity(3), Some(Money::from_cents(450)));
    /// assert_eq!(Money::from_cents(i64::MAX).checked_mul_quantity(2), None);
    /// ```
    #[inline]
    pub const fn checked_mul_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Adds two amounts, returning `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Applies a percentage discount and returns the discounted amount.
    ///
    /// The discount amount is rounded half-up to the cent before it is
    /// subtracted. For a non-negative amount and a rate within 0-100% the
    /// result is never negative and never exceeds the original amount.
    ///
    /// ## Example
    /// ```rust
    /// use vend_core::money::Money;
    /// use vend_core::types::DiscountRate;
    ///
    /// let price = Money::from_cents(150); // $1.50
    /// let discounted = price.apply_percentage_discount(DiscountRate::from_bps(1000)); // 10% off
    /// assert_eq!(discounted.cents(), 135); // $1.35
    /// ```
    pub fn apply_percentage_discount(&self, rate: DiscountRate) -> Money {
        // i128 keeps the intermediate product from overflowing
        let discount_amount = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(self.0 - discount_amount as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money as `$D.CC`, negative amounts as `-$D.CC`.
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

/// Multiplication by i64 (for quantity calculations).
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
