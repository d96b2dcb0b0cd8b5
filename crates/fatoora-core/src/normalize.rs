//! # Input Normalizer
//!
//! Turns raw form input into the canonical strings placed in the TLV payload.
//!
//! ## Lenient Paths
//! Two normalizers never fail. Instead they report which branch produced
//! their value through [`Normalized`]:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  normalize_amount("abc")         → Fallback("0.00")                    │
//! │  normalize_amount("10.005")      → Parsed("10.01")                     │
//! │                                                                         │
//! │  to_utc_iso_timestamp(...)       → Parsed("2024-01-01T09:00:00Z")      │
//! │     zone cannot resolve the time → Fallback(naive local + "Z")         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Callers that only need the string use [`Normalized::into_value`]; tests
//! and diagnostics can match on the branch.

use std::str::FromStr;

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CoreResult;
use crate::money::Money;
use crate::validation::validate_seller_name;

/// Output format of TLV tag 3.
pub const ISO_UTC_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

// =============================================================================
// Normalized
// =============================================================================

/// A normalized value together with the branch that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "value", rename_all = "snake_case")]
pub enum Normalized<T> {
    /// The input was understood as given.
    Parsed(T),

    /// The input could not be understood; a documented substitute was used.
    Fallback(T),
}

impl<T> Normalized<T> {
    /// Borrows the value regardless of branch.
    pub fn value(&self) -> &T {
        match self {
            Normalized::Parsed(v) | Normalized::Fallback(v) => v,
        }
    }

    /// Consumes self and returns the value regardless of branch.
    pub fn into_value(self) -> T {
        match self {
            Normalized::Parsed(v) | Normalized::Fallback(v) => v,
        }
    }

    /// True when the substitute branch was taken.
    pub fn is_fallback(&self) -> bool {
        matches!(self, Normalized::Fallback(_))
    }

    /// Maps the value, keeping the branch.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Normalized<U> {
        match self {
            Normalized::Parsed(v) => Normalized::Parsed(f(v)),
            Normalized::Fallback(v) => Normalized::Fallback(f(v)),
        }
    }
}

// =============================================================================
// Seller / VAT Number
// =============================================================================

/// Trims the seller name; an empty name is a validation error.
pub fn normalize_seller(raw: &str) -> CoreResult<String> {
    Ok(validate_seller_name(raw)?)
}

/// Keeps only the ASCII digits of a VAT registration number.
///
/// Length is not checked here; see [`crate::validation::validate_vat_number`].
///
/// ## Example
/// ```rust
/// use fatoora_core::normalize::normalize_vat;
///
/// assert_eq!(normalize_vat("SA-123456789012345"), "123456789012345");
/// assert_eq!(normalize_vat("3000 1234 5600 003"), "300012345600003");
/// ```
pub fn normalize_vat(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

// =============================================================================
// Amounts
// =============================================================================

/// Value of an Arabic-Indic (U+0660..U+0669) or Extended Arabic-Indic
/// (U+06F0..U+06F9) digit.
pub fn arabic_digit_value(c: char) -> Option<u32> {
    match c {
        '\u{0660}'..='\u{0669}' => Some(c as u32 - 0x0660),
        '\u{06F0}'..='\u{06F9}' => Some(c as u32 - 0x06F0),
        _ => None,
    }
}

/// Replaces Arabic-Indic digits of either block with ASCII digits.
fn fold_arabic_digits(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            arabic_digit_value(c)
                .and_then(|d| char::from_digit(d, 10))
                .unwrap_or(c)
        })
        .collect()
}

/// Parses decimal text exactly.
///
/// Surrounding whitespace is ignored, Arabic-Indic digits read as their
/// ASCII counterparts and scientific notation (`1.5e2`) is accepted.
/// Returns `None` for anything else.
///
/// ## Example
/// ```rust
/// use fatoora_core::normalize::parse_decimal;
///
/// assert_eq!(parse_decimal("١١٥.٥").map(|d| d.to_string()), Some("115.5".to_string()));
/// ```
pub fn parse_decimal(raw: &str) -> Option<Decimal> {
    let folded = fold_arabic_digits(raw);
    let text = folded.trim();
    if text.is_empty() {
        return None;
    }

    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

/// Parses a monetary amount, rounding half-up to two fraction digits.
///
/// Unparseable input and amounts too large to represent fall back to zero.
pub fn parse_amount(raw: &str) -> Normalized<Money> {
    match parse_decimal(raw).and_then(Money::from_decimal_half_up) {
        Some(money) => Normalized::Parsed(money),
        None => Normalized::Fallback(Money::zero()),
    }
}

/// Normalizes a monetary amount to its TLV text form.
///
/// ## Example
/// ```rust
/// use fatoora_core::normalize::{normalize_amount, Normalized};
///
/// assert_eq!(normalize_amount("10"), Normalized::Parsed("10.00".to_string()));
/// assert_eq!(normalize_amount("10.005"), Normalized::Parsed("10.01".to_string()));
/// assert_eq!(normalize_amount("abc"), Normalized::Fallback("0.00".to_string()));
/// assert_eq!(normalize_amount("-0.001"), Normalized::Parsed("-0.00".to_string()));
/// ```
///
/// A negative input that rounds to zero keeps its sign (`-0.00`); the
/// fallback is always unsigned.
pub fn normalize_amount(raw: &str) -> Normalized<String> {
    match parse_amount(raw) {
        Normalized::Parsed(money) if money.is_zero() && raw.trim_start().starts_with('-') => {
            Normalized::Parsed(format!("-{}", money))
        }
        normalized => normalized.map(|money| money.to_string()),
    }
}

// =============================================================================
// Timestamp
// =============================================================================

/// A zone that can place a wall-clock reading on the UTC timeline.
///
/// Implemented for every `chrono` time zone, so `Local`, `Utc` and
/// `FixedOffset` all work out of the box.
pub trait LocalZone {
    /// Resolves a local reading to UTC, or `None` when the reading does not
    /// exist in this zone.
    fn resolve_utc(&self, local: &NaiveDateTime) -> Option<DateTime<Utc>>;
}

impl<Tz: TimeZone> LocalZone for Tz {
    fn resolve_utc(&self, local: &NaiveDateTime) -> Option<DateTime<Utc>> {
        // Ambiguous readings (DST fold) take the first occurrence.
        self.from_local_datetime(local)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// Builds the tag 3 timestamp using the system local zone.
pub fn to_utc_iso_timestamp(date: NaiveDate, time: NaiveTime) -> Normalized<String> {
    to_utc_iso_timestamp_in(&Local, date, time)
}

/// Builds the tag 3 timestamp, interpreting `date` + `time` in `zone`.
///
/// Fractional seconds are discarded before conversion. When the zone cannot
/// resolve the reading, or the UTC result leaves years 1..=9999, the naive
/// local value is formatted with a trailing `Z` instead.
pub fn to_utc_iso_timestamp_in<Z: LocalZone + ?Sized>(
    zone: &Z,
    date: NaiveDate,
    time: NaiveTime,
) -> Normalized<String> {
    let time = time.with_nanosecond(0).unwrap_or(time);
    let local = NaiveDateTime::new(date, time);

    match zone
        .resolve_utc(&local)
        .filter(|utc| (1..=9999).contains(&utc.year()))
    {
        Some(utc) => Normalized::Parsed(utc.format(ISO_UTC_FORMAT).to_string()),
        None => Normalized::Fallback(local.format(ISO_UTC_FORMAT).to_string()),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    /// A zone with no valid readings, to drive the fallback branch.
    struct Unresolvable;

    impl LocalZone for Unresolvable {
        fn resolve_utc(&self, _local: &NaiveDateTime) -> Option<DateTime<Utc>> {
            None
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn test_normalize_vat() {
        assert_eq!(normalize_vat("SA-123456789012345"), "123456789012345");
        assert_eq!(normalize_vat("12345"), "12345");
        assert_eq!(normalize_vat(""), "");
        // Arabic-Indic digits are not ASCII digits and are dropped
        assert_eq!(normalize_vat("١٢٣"), "");
    }

    #[test]
    fn test_normalize_seller() {
        assert_eq!(normalize_seller("  Acme Trading  ").unwrap(), "Acme Trading");
        assert!(normalize_seller("   ").is_err());
    }

    #[test]
    fn test_normalize_amount_formats_two_digits() {
        assert_eq!(normalize_amount("10").into_value(), "10.00");
        assert_eq!(normalize_amount("115").into_value(), "115.00");
        assert_eq!(normalize_amount("0.1").into_value(), "0.10");
        assert_eq!(normalize_amount(" 7.5 ").into_value(), "7.50");
    }

    #[test]
    fn test_normalize_amount_rounds_half_up() {
        assert_eq!(normalize_amount("10.005"), Normalized::Parsed("10.01".to_string()));
        assert_eq!(normalize_amount("10.004"), Normalized::Parsed("10.00".to_string()));
        assert_eq!(normalize_amount("2.675"), Normalized::Parsed("2.68".to_string()));
    }

    #[test]
    fn test_normalize_amount_scientific() {
        assert_eq!(normalize_amount("1.5e2"), Normalized::Parsed("150.00".to_string()));
    }

    #[test]
    fn test_normalize_amount_fallback() {
        assert_eq!(normalize_amount("abc"), Normalized::Fallback("0.00".to_string()));
        assert_eq!(normalize_amount(""), Normalized::Fallback("0.00".to_string()));
        assert!(normalize_amount("1,000").is_fallback());
        assert_eq!(normalize_amount("-abc"), Normalized::Fallback("0.00".to_string()));
    }

    #[test]
    fn test_normalize_amount_arabic_indic_digits() {
        assert_eq!(normalize_amount("١١٥"), Normalized::Parsed("115.00".to_string()));
        assert_eq!(normalize_amount("١٥.٠٠").into_value(), "15.00");
        assert_eq!(normalize_amount("۱۰.۰۰۵"), Normalized::Parsed("10.01".to_string()));
        assert_eq!(normalize_amount(" ٧ "), Normalized::Parsed("7.00".to_string()));
    }

    #[test]
    fn test_normalize_amount_negative_zero_keeps_sign() {
        assert_eq!(normalize_amount("-0"), Normalized::Parsed("-0.00".to_string()));
        assert_eq!(normalize_amount("-0.001"), Normalized::Parsed("-0.00".to_string()));
        assert_eq!(normalize_amount(" -0.004 "), Normalized::Parsed("-0.00".to_string()));
        assert_eq!(normalize_amount("-0.005"), Normalized::Parsed("-0.01".to_string()));
        assert_eq!(normalize_amount("0"), Normalized::Parsed("0.00".to_string()));
    }

    #[test]
    fn test_arabic_digit_value() {
        assert_eq!(arabic_digit_value('٠'), Some(0));
        assert_eq!(arabic_digit_value('٩'), Some(9));
        assert_eq!(arabic_digit_value('۷'), Some(7));
        assert_eq!(arabic_digit_value('7'), None);
    }

    #[test]
    fn test_timestamp_converts_to_utc() {
        let riyadh = FixedOffset::east_opt(3 * 3600).unwrap();
        let ts = to_utc_iso_timestamp_in(&riyadh, date(2024, 1, 1), time(12, 0, 0));
        assert_eq!(ts, Normalized::Parsed("2024-01-01T09:00:00Z".to_string()));
    }

    #[test]
    fn test_timestamp_crosses_midnight() {
        let riyadh = FixedOffset::east_opt(3 * 3600).unwrap();
        let ts = to_utc_iso_timestamp_in(&riyadh, date(2024, 3, 1), time(1, 30, 0));
        assert_eq!(ts.into_value(), "2024-02-29T22:30:00Z");
    }

    #[test]
    fn test_timestamp_in_utc_is_identity() {
        let ts = to_utc_iso_timestamp_in(&Utc, date(2024, 1, 1), time(12, 0, 0));
        assert_eq!(ts, Normalized::Parsed("2024-01-01T12:00:00Z".to_string()));
    }

    #[test]
    fn test_timestamp_drops_fractional_seconds() {
        let t = NaiveTime::from_hms_milli_opt(12, 0, 0, 999).unwrap();
        let ts = to_utc_iso_timestamp_in(&Utc, date(2024, 1, 1), t);
        assert_eq!(ts.into_value(), "2024-01-01T12:00:00Z");
    }

    #[test]
    fn test_timestamp_fallback_keeps_naive_local() {
        let ts = to_utc_iso_timestamp_in(&Unresolvable, date(2024, 1, 1), time(12, 0, 0));
        assert_eq!(ts, Normalized::Fallback("2024-01-01T12:00:00Z".to_string()));
    }

    #[test]
    fn test_timestamp_fallback_when_year_leaves_range() {
        let riyadh = FixedOffset::east_opt(3 * 3600).unwrap();
        let ts = to_utc_iso_timestamp_in(&riyadh, date(1, 1, 1), time(1, 0, 0));
        assert_eq!(ts, Normalized::Fallback("0001-01-01T01:00:00Z".to_string()));
    }

    #[test]
    fn test_normalized_map_keeps_branch() {
        let n = Normalized::Fallback(1).map(|v| v + 1);
        assert_eq!(n, Normalized::Fallback(2));
        assert!(n.is_fallback());
        assert_eq!(*n.value(), 2);
    }
}
