//! # Money Module
//!
//! Provides the `Money` type for handling Saudi Riyal amounts safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    10.005 is stored as 10.00499999999999989...                          │
//! │    round-half-up on that value gives 10.00  ❌ WRONG!                   │
//! │                                                                         │
//! │  OUR SOLUTION: exact decimal parse, then integer halalas               │
//! │    "10.005" ──► Decimal(10.005) ──► 1000.5 halalas ──► 1001            │
//! │    Displayed as "10.01"                                                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use fatoora_core::money::Money;
//!
//! let total = Money::from_cents(11500);
//! assert_eq!(total.to_string(), "115.00");
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;
use ts_rs::TS;

use crate::types::VatRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in halalas (1/100 of a riyal).
///
/// ## Design Decisions
/// - **i64 (signed)**: credit notes carry negative totals
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Display**: plain `"115.00"`, no currency symbol, because this is
///   exactly the text that goes into TLV tags 4 and 5
///
/// ## Where Money is Used
/// ```text
/// raw total text ──► parse_amount() ──► Money ──► "115.00" ──► TLV tag 4
/// raw VAT text   ──► parse_amount() ──► Money ──► "15.00"  ──► TLV tag 5
///
/// calculator: total incl. VAT ──► split_inclusive() ──► net + VAT
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from halalas (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use fatoora_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // 10.99 SAR
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Converts a decimal riyal amount to Money, rounding half away from zero.
    ///
    /// This is the rounding applied to every amount placed in the QR payload:
    /// a tie at the third fraction digit always moves away from zero.
    ///
    /// Returns `None` when the amount does not fit in an `i64` of halalas.
    ///
    /// ## Example
    /// ```rust
    /// use fatoora_core::money::Money;
    /// use rust_decimal::Decimal;
    /// use std::str::FromStr;
    ///
    /// let m = Money::from_decimal_half_up(Decimal::from_str("10.005").unwrap()).unwrap();
    /// assert_eq!(m.cents(), 1001);
    /// ```
    pub fn from_decimal_half_up(amount: Decimal) -> Option<Self> {
        Self::from_decimal(amount, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Converts a decimal riyal amount to Money, rounding half to even.
    ///
    /// Used by the VAT calculator, whose figures follow bankers rounding.
    pub fn from_decimal_half_even(amount: Decimal) -> Option<Self> {
        Self::from_decimal(amount, RoundingStrategy::MidpointNearestEven)
    }

    fn from_decimal(amount: Decimal, strategy: RoundingStrategy) -> Option<Self> {
        amount
            .checked_mul(Decimal::ONE_HUNDRED)?
            .round_dp_with_strategy(0, strategy)
            .to_i64()
            .map(Money)
    }

    /// Returns the value in halalas.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole riyal portion.
    #[inline]
    pub const fn riyals(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the halala portion (always 0-99).
    #[inline]
    pub const fn halalas_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns the exact decimal riyal value (scale 2).
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, 2)
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

    /// Calculates VAT on a net amount, rounding half away from zero.
    ///
    /// ## Implementation
    /// Integer math on basis points: `(amount * bps ± 5000) / 10000`.
    /// The ±5000 is half of the divisor, signed like the product so that
    /// credit notes round symmetrically with invoices.
    ///
    /// ## Example
    /// ```rust
    /// use fatoora_core::money::Money;
    /// use fatoora_core::types::VatRate;
    ///
    /// let net = Money::from_cents(10000);          // 100.00 SAR
    /// let vat = net.calculate_vat(VatRate::from_bps(1500));
    /// assert_eq!(vat.cents(), 1500);               // 15.00 SAR
    /// ```
    pub fn calculate_vat(&self, rate: VatRate) -> Money {
        // i128 prevents overflow on large amounts
        let product = self.0 as i128 * rate.bps() as i128;
        let rounded = if product >= 0 {
            (product + 5000) / 10000
        } else {
            (product - 5000) / 10000
        };
        Money::from_cents(rounded as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain two-fraction-digit rendering: `115.00`, `-5.50`, `0.00`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}{}.{:02}",
            sign,
            self.riyals().abs(),
            self.halalas_part()
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

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.riyals(), 10);
        assert_eq!(money.halalas_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "10.99");
        assert_eq!(Money::from_cents(500).to_string(), "5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money::from_cents(-5).to_string(), "-0.05");
        assert_eq!(Money::from_cents(0).to_string(), "0.00");
    }

    #[test]
    fn test_half_up_rounding() {
        assert_eq!(Money::from_decimal_half_up(dec("10.005")).unwrap().cents(), 1001);
        assert_eq!(Money::from_decimal_half_up(dec("10.004")).unwrap().cents(), 1000);
        assert_eq!(Money::from_decimal_half_up(dec("0.125")).unwrap().cents(), 13);
        // Ties move away from zero on the negative side too
        assert_eq!(Money::from_decimal_half_up(dec("-2.345")).unwrap().cents(), -235);
    }

    #[test]
    fn test_half_even_rounding() {
        assert_eq!(Money::from_decimal_half_even(dec("0.125")).unwrap().cents(), 12);
        assert_eq!(Money::from_decimal_half_even(dec("0.135")).unwrap().cents(), 14);
    }

    #[test]
    fn test_out_of_range_decimal() {
        let huge = dec("99999999999999999999999");
        assert!(Money::from_decimal_half_up(huge).is_none());
    }

    #[test]
    fn test_to_decimal() {
        assert_eq!(Money::from_cents(11500).to_decimal(), dec("115.00"));
    }

    #[test]
    fn test_addition() {
        let sum = Money::from_cents(1000) + Money::from_cents(-250);
        assert_eq!(sum.cents(), 750);
    }

    #[test]
    fn test_vat_calculation() {
        let net = Money::from_cents(10000);
        assert_eq!(net.calculate_vat(VatRate::from_bps(1500)).cents(), 1500);

        // 0.05 SAR at 15% = 0.0075 → 0.01
        let small = Money::from_cents(5);
        assert_eq!(small.calculate_vat(VatRate::from_bps(1500)).cents(), 1);

        // Credit note: -0.05 SAR at 15% = -0.0075 → -0.01
        let credit = Money::from_cents(-5);
        assert_eq!(credit.calculate_vat(VatRate::from_bps(1500)).cents(), -1);
    }
}
