//! # Money Module
//!
//! Provides the `Money` type used for every price, fee and discount the
//! engine touches.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004                                      │
//! │                                                                         │
//! │  A 15% promo on a $19.99 set:                                           │
//! │    19.99 * 0.15 = 2.9985 → which cent does the customer get?           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    1999 cents × 1500 bps = 299.85 cents → 300 cents (half-up)          │
//! │    One rounding step, one documented rule                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use setshop_core::money::Money;
//!
//! let base = Money::from_cents(2000);          // $20.00
//! let line = base.multiply_quantity(2);        // $40.00
//! let promo = line.percentage(1000);           // 10% → $4.00
//!
//! assert_eq!((line - promo).format_currency("$"), "$36.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: discount line items carry negative amounts
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Serializes as a bare integer**: the UI receives cents and formats them
///
/// ## Where Money Flows
/// ```text
/// CatalogShape.base_price ──► ItemSummary.unit_price ──► LineItem.amount
///                                                             │
/// SpeedOption.fee ──► delivery LineItem.amount ───────────────┤
///                                                             ▼
///                                  Breakdown.subtotal ──► discounts ──► total
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use setshop_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1099).cents(), 1099);
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

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion, always 0-99.
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

    /// Checks if the value is greater than zero.
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is less than zero.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.saturating_abs())
    }

    /// Returns the smaller of two amounts.
    #[inline]
    pub fn min(self, other: Money) -> Money {
        Money(self.0.min(other.0))
    }

    /// Negative amounts become zero; everything else is unchanged.
    ///
    /// Used wherever an input is documented as "non-negative" but arrives
    /// from an untrusted source (admin overrides, validated promo amounts).
    #[inline]
    pub fn non_negative(self) -> Money {
        Money(self.0.max(0))
    }

    /// Clamps a requested discount to what is left of `remaining`.
    ///
    /// The result is always in `0..=remaining` (or zero when `remaining`
    /// is not positive), so subtracting it can never go below zero.
    ///
    /// ```rust
    /// use setshop_core::money::Money;
    ///
    /// let remaining = Money::from_cents(4000);
    /// assert_eq!(Money::from_cents(10_000).clamp_to(remaining), remaining);
    /// assert_eq!(Money::from_cents(-500).clamp_to(remaining), Money::zero());
    /// ```
    #[inline]
    pub fn clamp_to(self, remaining: Money) -> Money {
        self.non_negative().min(remaining.non_negative())
    }

    /// Multiplies a unit price by a quantity.
    ///
    /// Saturates instead of overflowing; a cart that reaches `i64::MAX`
    /// cents is nonsense, but it must not panic the pricing call.
    ///
    /// ```rust
    /// use setshop_core::money::Money;
    ///
    /// let unit = Money::from_cents(2000);
    /// assert_eq!(unit.multiply_quantity(2).cents(), 4000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.saturating_mul(qty as i64))
    }

    /// Computes a percentage of this amount, rounded half-up to the cent.
    ///
    /// ## Arguments
    /// * `bps` - Percentage in basis points (1000 = 10%)
    ///
    /// ## Implementation
    /// Integer math: `(amount * bps + 5000) / 10000`. The +5000 is the
    /// half-cent, so 299.5 cents becomes 300. Only ever called with
    /// non-negative running subtotals.
    ///
    /// ```rust
    /// use setshop_core::money::Money;
    ///
    /// // 15% of $19.99 = 299.85 cents → 300
    /// assert_eq!(Money::from_cents(1999).percentage(1500).cents(), 300);
    /// ```
    pub fn percentage(&self, bps: u32) -> Money {
        let scaled = (self.0 as i128 * bps as i128 + 5000) / 10000;
        Money(scaled.clamp(i64::MIN as i128, i64::MAX as i128) as i64)
    }

    /// Formats the amount with a currency symbol and two decimals.
    ///
    /// This is the presentation-side currency formatter. The engine never
    /// calls it; receipts and UIs do.
    ///
    /// ```rust
    /// use setshop_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(4000).format_currency("$"), "$40.00");
    /// assert_eq!(Money::from_cents(-550).format_currency("€"), "-€5.50");
    /// ```
    pub fn format_currency(&self, symbol: &str) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let magnitude = self.0.unsigned_abs();
        format!("{}{}{}.{:02}", sign, symbol, magnitude / 100, magnitude % 100)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Dollar formatting, handy in logs and test failure output.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_currency("$"))
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
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(self.0.saturating_neg())
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
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
