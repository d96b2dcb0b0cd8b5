//! # PDF Dates
//!
//! Transcodes the `CreationDate` / `ModDate` values of a PDF document info
//! dictionary to and from the form shown to users.
//!
//! ```text
//! PDF form:      D:20240101120000+03'00'
//!                  │   │ │ │ │ │  └── offset, optional (Z, +HH'MM', -HH'MM')
//!                  YYYY MM DD HH MM SS, trailing parts optional
//!
//! Display form:  01/01/2024, 09:00:00   (UTC)
//! ```
//!
//! Display is in UTC whenever the file states an offset, so writing the
//! display form back with `+00'00'` records the same instant. Dates without
//! an offset are shown as written.

use chrono::{FixedOffset, NaiveDate, NaiveDateTime};

use crate::error::{CoreError, CoreResult};

/// Human display format for PDF dates.
pub const DISPLAY_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

/// A parsed PDF date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PdfDate {
    /// Wall-clock reading as written.
    pub local: NaiveDateTime,

    /// Offset from UTC, when the file states one.
    pub offset: Option<FixedOffset>,
}

impl PdfDate {
    /// Parses `D:YYYY[MM[DD[HH[mm[SS]]]]][Z|±HH['mm[']]]`.
    ///
    /// The `D:` prefix is optional, as many writers omit it.
    pub fn parse(text: &str) -> CoreResult<Self> {
        let trimmed = text.trim();
        let body = trimmed.strip_prefix("D:").unwrap_or(trimmed);

        let digit_count = body.bytes().take_while(u8::is_ascii_digit).count();
        if !(4..=14).contains(&digit_count) || digit_count % 2 != 0 {
            return Err(invalid_pdf_date(text));
        }
        let (digits, zone) = body.split_at(digit_count);

        let part = |start: usize, default: u32| -> u32 {
            digits
                .get(start..start + 2)
                .and_then(|d| d.parse().ok())
                .unwrap_or(default)
        };

        let year: i32 = digits[..4].parse().map_err(|_| invalid_pdf_date(text))?;
        let local = NaiveDate::from_ymd_opt(year, part(4, 1), part(6, 1))
            .and_then(|d| d.and_hms_opt(part(8, 0), part(10, 0), part(12, 0)))
            .ok_or_else(|| invalid_pdf_date(text))?;

        let offset = parse_offset(zone).ok_or_else(|| invalid_pdf_date(text))?;

        Ok(PdfDate { local, offset })
    }

    /// Renders in PDF form, e.g. `D:20240101120000+03'00'`.
    pub fn to_pdf_string(&self) -> String {
        let mut out = self.local.format("D:%Y%m%d%H%M%S").to_string();
        if let Some(offset) = self.offset {
            out.push_str(&format_offset(offset));
        }
        out
    }

    /// The reading in UTC, or as written when the file states no offset.
    pub fn utc_reading(&self) -> NaiveDateTime {
        self.offset
            .and_then(|offset| self.local.and_local_timezone(offset).single())
            .map(|dt| dt.naive_utc())
            .unwrap_or(self.local)
    }

    /// Renders the UTC reading in display form, e.g. `01/01/2024, 09:00:00`.
    pub fn to_display(&self) -> String {
        self.utc_reading().format(DISPLAY_FORMAT).to_string()
    }
}

/// `""` → no offset, `Z` → UTC, `+03'00'` / `-0530` / `+03` → that offset.
///
/// Outer `None` means the text is malformed.
fn parse_offset(zone: &str) -> Option<Option<FixedOffset>> {
    if zone.is_empty() {
        return Some(None);
    }

    let (sign, rest) = match zone.as_bytes()[0] {
        b'Z' => return Some(Some(FixedOffset::east_opt(0)?)),
        b'+' => (1, &zone[1..]),
        b'-' => (-1, &zone[1..]),
        _ => return None,
    };

    let digits: String = rest.chars().filter(|c| *c != '\'').collect();
    if !digits.bytes().all(|b| b.is_ascii_digit()) || !(digits.len() == 2 || digits.len() == 4) {
        return None;
    }

    let hours: i32 = digits[..2].parse().ok()?;
    let minutes: i32 = match digits.get(2..4) {
        Some(m) => m.parse().ok()?,
        None => 0,
    };
    if hours > 23 || minutes > 59 {
        return None;
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).map(Some)
}

fn format_offset(offset: FixedOffset) -> String {
    let seconds = offset.local_minus_utc();
    let sign = if seconds < 0 { '-' } else { '+' };
    let minutes = seconds.abs() / 60;
    format!("{}{:02}'{:02}'", sign, minutes / 60, minutes % 60)
}

fn invalid_pdf_date(text: &str) -> CoreError {
    CoreError::InvalidDateTime {
        field: "PDF date".to_string(),
        value: text.to_string(),
        expected: "D:YYYYMMDDHHMMSS+HH'MM'".to_string(),
    }
}

// =============================================================================
// Transcoding
// =============================================================================

/// `D:20240101120000+03'00'` → `01/01/2024, 09:00:00`.
pub fn pdf_date_to_display(text: &str) -> CoreResult<String> {
    Ok(PdfDate::parse(text)?.to_display())
}

/// `01/01/2024, 12:00:00` → `D:20240101120000+03'00'` for the given offset.
pub fn display_to_pdf_date(text: &str, offset: FixedOffset) -> CoreResult<String> {
    let local = NaiveDateTime::parse_from_str(text.trim(), DISPLAY_FORMAT).map_err(|_| {
        CoreError::InvalidDateTime {
            field: "PDF date".to_string(),
            value: text.to_string(),
            expected: "dd/mm/YYYY, HH:MM:SS".to_string(),
        }
    })?;

    Ok(PdfDate {
        local,
        offset: Some(offset),
    }
    .to_pdf_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn test_full_date_to_display() {
        assert_eq!(
            pdf_date_to_display("D:20240315143005+03'00'").unwrap(),
            "15/03/2024, 11:30:05"
        );
        assert_eq!(
            pdf_date_to_display("D:20240101013000-05'30'").unwrap(),
            "01/01/2024, 07:00:00"
        );
    }

    #[test]
    fn test_display_round_trip_keeps_instant() {
        let original = PdfDate::parse("D:20240101013000+03'00'").unwrap();
        let display = original.to_display();
        assert_eq!(display, "31/12/2023, 22:30:00");

        let written = PdfDate::parse(&display_to_pdf_date(&display, utc()).unwrap()).unwrap();
        assert_eq!(written.utc_reading(), original.utc_reading());
    }

    #[test]
    fn test_no_offset_shown_as_written() {
        let d = PdfDate::parse("D:20240315143005").unwrap();
        assert_eq!(d.utc_reading(), d.local);
    }

    #[test]
    fn test_truncated_forms() {
        assert_eq!(pdf_date_to_display("D:2024").unwrap(), "01/01/2024, 00:00:00");
        assert_eq!(pdf_date_to_display("D:20240315").unwrap(), "15/03/2024, 00:00:00");
        assert_eq!(pdf_date_to_display("20240315143005Z").unwrap(), "15/03/2024, 14:30:05");
    }

    #[test]
    fn test_offset_variants() {
        let d = PdfDate::parse("D:20240315143005-05'30'").unwrap();
        assert_eq!(d.offset, FixedOffset::west_opt(5 * 3600 + 30 * 60));

        let d = PdfDate::parse("D:20240315143005+0300").unwrap();
        assert_eq!(d.offset, FixedOffset::east_opt(3 * 3600));

        let d = PdfDate::parse("D:20240315143005Z00'00'").unwrap();
        assert_eq!(d.offset, Some(utc()));

        let d = PdfDate::parse("D:20240315143005").unwrap();
        assert_eq!(d.offset, None);
    }

    #[test]
    fn test_invalid_dates() {
        assert!(PdfDate::parse("").is_err());
        assert!(PdfDate::parse("D:24").is_err());
        assert!(PdfDate::parse("D:20241345").is_err());
        assert!(PdfDate::parse("D:20240315143005+3").is_err());
        assert!(PdfDate::parse("yesterday").is_err());
    }

    #[test]
    fn test_display_to_pdf() {
        assert_eq!(
            display_to_pdf_date("15/03/2024, 14:30:05", utc()).unwrap(),
            "D:20240315143005+00'00'"
        );
        let riyadh = FixedOffset::east_opt(3 * 3600).unwrap();
        assert_eq!(
            display_to_pdf_date("01/01/2024, 00:00:00", riyadh).unwrap(),
            "D:20240101000000+03'00'"
        );
        assert!(display_to_pdf_date("2024-01-01 00:00:00", utc()).is_err());
    }

    #[test]
    fn test_pdf_string_roundtrip() {
        let text = "D:20240315143005-05'30'";
        assert_eq!(PdfDate::parse(text).unwrap().to_pdf_string(), text);
    }
}
