//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With floats:                                                           │
//! │    25.90 × 3 = 77.69999999999999  ❌ WRONG!                             │
//! │                                                                         │
//! │  A cash balance that adds and removes such values drifts away from     │
//! │  zero after a commit/cancel round trip.                                │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    2590 cents × 3 = 7770 cents, and 7770 - 7770 = 0 exactly            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tally_core::money::Money;
//!
//! let price = Money::from_cents(2590);          // 25.90
//! let line_total = price.checked_mul(3).unwrap(); // 77.70
//! assert_eq!(line_total.to_string(), "77.70");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::SubAssign;
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: A cancellation subtracts from the balance
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// ## Where Money is Used
/// ```text
/// Product.price ──► SaleLineItem total ──► Sale total ──► Registry cash balance
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// let price = Money::from_cents(890); // Represents 8.90
    /// assert_eq!(price.cents(), 890);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(-550).minor(), 50);
    /// ```
    #[inline]
    pub const fn minor(&self) -> i64 {
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

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Adds two amounts, or `None` if the result does not fit.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// let balance = Money::from_cents(7770);
    /// assert_eq!(balance.checked_add(Money::from_cents(890)), Some(Money::from_cents(8660)));
    /// assert_eq!(Money::from_cents(i64::MAX).checked_add(balance), None);
    /// ```
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Multiplies by a line quantity, or `None` if the result does not fit.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(2590);
    /// assert_eq!(unit_price.checked_mul(3), Some(Money::from_cents(7770)));
    /// assert_eq!(Money::from_cents(i64::MAX / 2).checked_mul(3), None);
    /// ```
    #[inline]
    pub const fn checked_mul(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain decimal rendering (`77.70`, `-5.50`).
///
/// Currency symbols are a presentation concern; see the host's
/// `ConfigState::format_currency`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
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
        let money = Money::from_cents(2590);
        assert_eq!(money.cents(), 2590);
        assert_eq!(money.major(), 25);
        assert_eq!(money.minor(), 90);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(7770).to_string(), "77.70");
        assert_eq!(Money::from_cents(500).to_string(), "5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money::from_cents(-5).to_string(), "-0.05");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_checked_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!(a.checked_add(b), Some(Money::from_cents(1500)));
        assert_eq!(a.checked_mul(3), Some(Money::from_cents(3000)));
        assert_eq!(Money::from_cents(i64::MAX).checked_add(Money::from_cents(1)), None);
        assert_eq!(Money::from_cents(i64::MAX / 2).checked_mul(3), None);

        let mut balance = a;
        balance -= b;
        assert_eq!(balance.cents(), 500);
    }

    #[test]
    fn test_commit_cancel_round_trip_is_exact() {
        // The float version of this leaves a residue
        let total = Money::from_cents(2590).checked_mul(3).unwrap();
        let mut balance = Money::zero().checked_add(total).unwrap();
        assert_eq!(balance.to_string(), "77.70");
        balance -= total;
        assert!(balance.is_zero());
    }

    #[test]
    fn test_is_positive() {
        assert!(Money::from_cents(100).is_positive());
        assert!(!Money::from_cents(-100).is_positive());
        assert!(!Money::zero().is_positive());
    }
}
