//! # VAT Calculator
//!
//! Splits a VAT-inclusive total into its net and VAT parts, or adds VAT to
//! a net amount.
//!
//! ```text
//! split_inclusive(115.00, 15%)  →  net 100.00 │ VAT 15.00 │ total 115.00
//! split_inclusive(100.00, 15%)  →  net  86.96 │ VAT 13.04 │ total 100.00
//! add_exclusive(100.00, 15%)    →  net 100.00 │ VAT 15.00 │ total 115.00
//! ```
//!
//! The inclusive split rounds half to even, matching how the figures are
//! shown on the calculator. The amounts written into the QR payload are
//! rounded half-up by the normalizer, independently of this module.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::normalize::parse_decimal;
use crate::types::VatRate;
use crate::validation::ValidationResult;

/// Net, VAT and total of one calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct VatBreakdown {
    pub net: Money,
    pub vat: Money,
    pub total: Money,
}

/// Parses a percentage such as `"15"` or `"8.25"` into a [`VatRate`].
///
/// Any non-negative rate is accepted, including rates above 100%; the
/// calculator works for them. Use [`validate_vat_rate_bps`] where a
/// statutory 0..=100% rate is required.
///
/// [`validate_vat_rate_bps`]: crate::validation::validate_vat_rate_bps
///
/// ## Example
/// ```rust
/// use fatoora_core::vat::parse_vat_rate;
///
/// assert_eq!(parse_vat_rate("15").unwrap().bps(), 1500);
/// assert_eq!(parse_vat_rate("150").unwrap().bps(), 15000);
/// assert!(parse_vat_rate("fifteen").is_err());
/// ```
pub fn parse_vat_rate(percent: &str) -> ValidationResult<VatRate> {
    let rate = parse_decimal(percent)
        .ok_or_else(|| ValidationError::invalid_format("vat rate", "must be a number"))?;
    if rate.is_sign_negative() && !rate.is_zero() {
        return Err(ValidationError::invalid_format("vat rate", "must not be negative"));
    }

    rate.checked_mul(Decimal::ONE_HUNDRED)
        .map(|bps| bps.round())
        .and_then(|bps| bps.to_u32())
        .map(VatRate::from_bps)
        .ok_or_else(|| ValidationError::invalid_format("vat rate", "out of range"))
}

/// Splits a VAT-inclusive total.
///
/// `net = round(total / (1 + rate), 2)` and `vat = round(total - net, 2)`.
/// Returns `None` only when the total does not fit in [`Money`].
pub fn split_inclusive(total: Decimal, rate: VatRate) -> Option<VatBreakdown> {
    let divisor = Decimal::ONE + Decimal::new(rate.bps() as i64, 4);
    let net = Money::from_decimal_half_even(total.checked_div(divisor)?)?;
    let vat = Money::from_decimal_half_even(total.checked_sub(net.to_decimal())?)?;

    Some(VatBreakdown {
        net,
        vat,
        total: net + vat,
    })
}

/// Adds VAT on top of a net amount (VAT rounded half-up).
pub fn add_exclusive(net: Money, rate: VatRate) -> VatBreakdown {
    let vat = net.calculate_vat(rate);
    VatBreakdown {
        net,
        vat,
        total: net + vat,
    }
}

/// Runs the calculator from raw text input.
///
/// Unlike the QR normalizer, invalid numbers here are errors: the
/// calculator has no sensible figure to show for them.
pub fn calculate_from_text(total: &str, rate_percent: &str) -> ValidationResult<VatBreakdown> {
    let total = parse_decimal(total)
        .ok_or_else(|| ValidationError::invalid_format("total", "must be a number"))?;
    let rate = parse_vat_rate(rate_percent)?;

    split_inclusive(total, rate)
        .ok_or_else(|| ValidationError::invalid_format("total", "out of range"))
}
