//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  On a jewelry invoice the stakes are higher than a grocery till:        │
//! │    18% GST on ₹1,84,999.50 must come out the same on every terminal    │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Paise                                            │
//! │    ₹1,849.99 is stored as 184999 paise                                  │
//! │    All arithmetic is exact; only display code shows rupees              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use suvarna_core::money::Money;
//!
//! // Create from paise (preferred)
//! let price = Money::from_paise(184999); // ₹1,849.99
//!
//! // Arithmetic operations
//! let doubled = price * 2;
//! let total = price + Money::from_rupees(150);
//!
//! // NEVER do this:
//! // let bad = Money::from_float(1849.99); // NO SUCH METHOD EXISTS!
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (paise for INR).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative intermediate values (waiver math)
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// Every monetary value in the system flows through this type:
/// ornament cost → vault line → subtotal → GST → waivers → total payable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paise (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use suvarna_core::money::Money;
    ///
    /// let price = Money::from_paise(184999); // Represents ₹1,849.99
    /// assert_eq!(price.paise(), 184999);
    /// ```
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Creates a Money value from whole rupees.
    ///
    /// Convenient for catalog prices, which are quoted in whole rupees.
    ///
    /// ## Example
    /// ```rust
    /// use suvarna_core::money::Money;
    ///
    /// let price = Money::from_rupees(1000);
    /// assert_eq!(price.paise(), 100000);
    /// ```
    #[inline]
    pub const fn from_rupees(rupees: i64) -> Self {
        Money(rupees * 100)
    }

    /// Returns the value in paise (smallest currency unit).
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the whole-rupee portion.
    ///
    /// ## Example
    /// ```rust
    /// use suvarna_core::money::Money;
    ///
    /// let price = Money::from_paise(184999);
    /// assert_eq!(price.rupees(), 1849);
    /// ```
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the paise portion (always 0-99).
    #[inline]
    pub const fn paise_part(&self) -> i64 {
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

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Clamps negative values to zero.
    ///
    /// Stacked waivers can mathematically exceed subtotal + GST; the invoice
    /// total must never go below zero.
    ///
    /// ## Example
    /// ```rust
    /// use suvarna_core::money::Money;
    ///
    /// assert_eq!(Money::from_paise(-500).floor_zero(), Money::zero());
    /// assert_eq!(Money::from_paise(500).floor_zero().paise(), 500);
    /// ```
    #[inline]
    pub const fn floor_zero(&self) -> Self {
        if self.0 < 0 {
            Money(0)
        } else {
            *self
        }
    }

    /// Calculates GST for this amount at the given rate.
    ///
    /// ## Implementation
    /// Integer math with round-half-up: `(amount * bps + 5000) / 10000`.
    /// i128 intermediate prevents overflow on large invoice amounts.
    ///
    /// ## Example
    /// ```rust
    /// use suvarna_core::money::Money;
    /// use suvarna_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_rupees(1000);
    /// let gst = subtotal.calculate_gst(TaxRate::from_bps(1800)); // 18%
    /// assert_eq!(gst.rupees(), 180);
    /// ```
    pub fn calculate_gst(&self, rate: TaxRate) -> Money {
        let gst_paise = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_paise(gst_paise as i64)
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use suvarna_core::money::Money;
    ///
    /// let unit_cost = Money::from_rupees(48500);
    /// assert_eq!(unit_cost.multiply_quantity(2).rupees(), 97000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Returns the given percentage (in basis points) of this amount.
    ///
    /// Used for the manager waiver: `subtotal.percentage(500)` is the 5%
    /// waiver amount. Same rounding rule as [`Money::calculate_gst`].
    ///
    /// ## Example
    /// ```rust
    /// use suvarna_core::money::Money;
    ///
    /// let subtotal = Money::from_rupees(1000);
    /// assert_eq!(subtotal.percentage(500).rupees(), 50); // 5%
    /// ```
    pub fn percentage(&self, bps: u32) -> Money {
        let part = (self.0 as i128 * bps as i128 + 5000) / 10000;
        Money::from_paise(part as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for logs and debugging. The portal frontend formats currency
/// itself to handle grouping (₹1,84,999 uses the Indian lakh system).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}₹{}.{:02}", sign, self.rupees().abs(), self.paise_part())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for quantity calculations).
impl Mul<i32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i32) -> Self {
        Money(self.0 * qty as i64)
    }
}

/// Multiplication by i64.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_paise() {
        let money = Money::from_paise(184999);
        assert_eq!(money.paise(), 184999);
        assert_eq!(money.rupees(), 1849);
        assert_eq!(money.paise_part(), 99);
    }

    #[test]
    fn test_from_rupees() {
        assert_eq!(Money::from_rupees(1000).paise(), 100000);
        assert_eq!(Money::from_rupees(-5).paise(), -500);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_paise(184999)), "₹1849.99");
        assert_eq!(format!("{}", Money::from_rupees(500)), "₹500.00");
        assert_eq!(format!("{}", Money::from_paise(-550)), "-₹5.50");
        assert_eq!(format!("{}", Money::zero()), "₹0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_paise(1000);
        let b = Money::from_paise(500);

        assert_eq!((a + b).paise(), 1500);
        assert_eq!((a - b).paise(), 500);
        let tripled: Money = a * 3;
        assert_eq!(tripled.paise(), 3000);

        let mut acc = Money::zero();
        acc += a;
        acc -= b;
        assert_eq!(acc.paise(), 500);
    }

    #[test]
    fn test_gst_basic() {
        // ₹1,000 at 18% = ₹180
        let amount = Money::from_rupees(1000);
        let gst = amount.calculate_gst(TaxRate::from_bps(1800));
        assert_eq!(gst.paise(), 18000);
    }

    #[test]
    fn test_gst_with_rounding() {
        // ₹0.03 at 18% = 0.54 paise → rounds to 1 paisa
        let amount = Money::from_paise(3);
        let gst = amount.calculate_gst(TaxRate::from_bps(1800));
        assert_eq!(gst.paise(), 1);

        // ₹0.02 at 18% = 0.36 paise → rounds to 0
        let amount = Money::from_paise(2);
        assert_eq!(amount.calculate_gst(TaxRate::from_bps(1800)).paise(), 0);
    }

    #[test]
    fn test_percentage() {
        let subtotal = Money::from_rupees(1000);
        assert_eq!(subtotal.percentage(500).paise(), 5000); // 5% = ₹50
        assert_eq!(subtotal.percentage(0).paise(), 0);
        assert_eq!(subtotal.percentage(10000), subtotal); // 100%
    }

    #[test]
    fn test_floor_zero() {
        assert_eq!(Money::from_paise(-1).floor_zero(), Money::zero());
        assert_eq!(Money::from_paise(0).floor_zero(), Money::zero());
        assert_eq!(Money::from_paise(42).floor_zero().paise(), 42);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        assert!(Money::from_paise(100).is_positive());
        assert!(Money::from_paise(-100).is_negative());
    }

    #[test]
    fn test_multiply_quantity() {
        let unit_cost = Money::from_rupees(48500);
        assert_eq!(unit_cost.multiply_quantity(3).rupees(), 145500);
    }
}
