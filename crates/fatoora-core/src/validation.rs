//! # Validation Module
//!
//! Strict input checks that run before anything is encoded.
//!
//! ## Validation Gate
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      QR Generation Gate                                 │
//! │                                                                         │
//! │  date text ──► parse_invoice_date ──┐                                  │
//! │  time text ──► parse_invoice_time ──┤── InvalidDateTime               │
//! │                                     │                                   │
//! │  VAT text ──► normalize_vat ──► validate_vat_number ── InvalidVatLength │
//! │                                                                         │
//! │  seller ──► validate_seller_name ── Validation(Required)               │
//! │                                                                         │
//! │  Amounts are NOT gated: they fall back to 0.00 (see normalize)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{NaiveDate, NaiveTime, Timelike};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::VAT_NUMBER_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Strict date format accepted by the generator.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Strict wall-clock time format accepted by the generator.
pub const TIME_FORMAT: &str = "%H:%M:%S";

// =============================================================================
// Date / Time
// =============================================================================

/// Parses a `YYYY-MM-DD` calendar date.
///
/// ## Example
/// ```rust
/// use fatoora_core::validation::parse_invoice_date;
///
/// assert!(parse_invoice_date("2024-01-01").is_ok());
/// assert!(parse_invoice_date("01/01/2024").is_err());
/// ```
pub fn parse_invoice_date(input: &str) -> CoreResult<NaiveDate> {
    NaiveDate::parse_from_str(input, DATE_FORMAT)
        .map_err(|_| invalid_date_time("date", input, "YYYY-MM-DD"))
}

/// Parses an `HH:MM:SS` wall-clock time.
///
/// Leap seconds (`23:59:60`) are rejected: they have no place on a receipt.
pub fn parse_invoice_time(input: &str) -> CoreResult<NaiveTime> {
    let time = NaiveTime::parse_from_str(input, TIME_FORMAT)
        .map_err(|_| invalid_date_time("time", input, "HH:MM:SS"))?;

    if time.nanosecond() >= 1_000_000_000 {
        return Err(invalid_date_time("time", input, "HH:MM:SS"));
    }

    Ok(time)
}

fn invalid_date_time(field: &str, value: &str, expected: &str) -> CoreError {
    CoreError::InvalidDateTime {
        field: field.to_string(),
        value: value.to_string(),
        expected: expected.to_string(),
    }
}

// =============================================================================
// VAT Number
// =============================================================================

/// Checks that a normalized VAT number has exactly 15 digits.
///
/// ## User Workflow
/// ```text
/// "SA-123456789012345" ──► normalize_vat ──► "123456789012345"
///                                                  │
///                                                  ▼
///                              validate_vat_number ← THIS FUNCTION
///                                                  │
///                          ├── len != 15? → InvalidVatLength
///                          └── OK → TLV tag 2
/// ```
pub fn validate_vat_number(digits: &str) -> CoreResult<()> {
    let length = digits.chars().count();
    if length != VAT_NUMBER_LEN {
        return Err(CoreError::InvalidVatLength { length });
    }
    Ok(())
}

// =============================================================================
// Seller Name
// =============================================================================

/// Trims a seller name and rejects it when nothing is left.
///
/// The byte-length limit is enforced later by the TLV encoder, which knows
/// which tag overflowed.
pub fn validate_seller_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::required("seller name"));
    }

    Ok(name.to_string())
}

// =============================================================================
// VAT Rate
// =============================================================================

/// Validates a VAT rate in basis points.
///
/// ## Rules
/// - Must be between 0 and 10000 (0% to 100%)
pub fn validate_vat_rate_bps(bps: i64) -> ValidationResult<u32> {
    if !(0..=10000).contains(&bps) {
        return Err(ValidationError::OutOfRange {
            field: "vat rate".to_string(),
            min: 0,
            max: 10000,
        });
    }

    Ok(bps as u32)
}

// =============================================================================
// Unit Tests
// =============================================================================
