//! # QR Payload Generation
//!
//! Orchestrates the full pipeline from raw form input to the base64 text
//! that goes into the QR symbol.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  date, time ──► strict parse ──────────────► InvalidDateTime           │
//! │  VAT number ──► digits only ──► len == 15? ─► InvalidVatLength         │
//! │  date + time ──► local → UTC ──► "YYYY-MM-DDTHH:MM:SSZ"                │
//! │  total, VAT ──► half-up, 2 digits (fallback 0.00)                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  TLV tags 1..5 ──────────────────────────────► ValueTooLarge           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  base64 ──► QrPayload { base64, bytes }                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The amounts are taken as given: nothing checks that the VAT figure matches
//! the total at any rate.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::Local;

use crate::error::{CoreError, CoreResult};
use crate::normalize::{
    normalize_amount, normalize_seller, normalize_vat, to_utc_iso_timestamp_in, LocalZone,
};
use crate::tlv::{decode_invoice_payload, encode_fields};
use crate::types::{InvoiceQrFields, QrPayload};
use crate::validation::{parse_invoice_date, parse_invoice_time, validate_vat_number};

// =============================================================================
// Base64
// =============================================================================

/// Encodes bytes as standard padded base64 (RFC 4648), no line breaks.
pub fn to_base64_ascii(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decodes standard padded base64. Surrounding whitespace is ignored.
pub fn from_base64_ascii(text: &str) -> CoreResult<Vec<u8>> {
    STANDARD
        .decode(text.trim())
        .map_err(|e| CoreError::InvalidBase64(e.to_string()))
}

impl QrPayload {
    /// Wraps a TLV byte sequence, deriving its base64 text.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        QrPayload {
            base64: to_base64_ascii(&bytes),
            bytes,
        }
    }

    /// Parses base64 text as scanned from a QR code.
    pub fn from_base64(text: &str) -> CoreResult<Self> {
        let bytes = from_base64_ascii(text)?;
        Ok(QrPayload::from_bytes(bytes))
    }

    /// Decodes the five invoice fields carried by this payload.
    pub fn decode_fields(&self) -> CoreResult<InvoiceQrFields> {
        decode_invoice_payload(&self.bytes)
    }
}

// =============================================================================
// Orchestration
// =============================================================================

/// Everything one generation produced, including which lenient
/// branches were taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrPayloadReport {
    pub payload: QrPayload,
    pub fields: InvoiceQrFields,

    /// The total was unparseable and encoded as `0.00`.
    pub total_fallback: bool,

    /// The VAT amount was unparseable and encoded as `0.00`.
    pub vat_fallback: bool,

    /// The timestamp is the naive local reading labelled `Z`.
    pub timestamp_fallback: bool,
}

impl QrPayloadReport {
    /// True when any lenient branch was taken.
    pub fn has_fallbacks(&self) -> bool {
        self.total_fallback || self.vat_fallback || self.timestamp_fallback
    }
}

/// Generates the ZATCA QR payload, interpreting date and time in the
/// system local zone.
///
/// ## Example
/// ```rust
/// use fatoora_core::payload::generate_zatca_qr_payload;
///
/// let payload = generate_zatca_qr_payload(
///     "Acme", "123456789012345", "115", "15", "2024-01-01", "12:00:00",
/// ).unwrap();
/// assert_eq!(&payload.bytes[..2], &[0x01, 0x04]);
/// ```
pub fn generate_zatca_qr_payload(
    seller: &str,
    raw_vat: &str,
    raw_total: &str,
    raw_vat_amount: &str,
    date_str: &str,
    time_str: &str,
) -> CoreResult<QrPayload> {
    generate_zatca_qr_payload_in(&Local, seller, raw_vat, raw_total, raw_vat_amount, date_str, time_str)
}

/// Generates the ZATCA QR payload with an explicit local zone.
pub fn generate_zatca_qr_payload_in<Z: LocalZone + ?Sized>(
    zone: &Z,
    seller: &str,
    raw_vat: &str,
    raw_total: &str,
    raw_vat_amount: &str,
    date_str: &str,
    time_str: &str,
) -> CoreResult<QrPayload> {
    generate_zatca_qr_report_in(zone, seller, raw_vat, raw_total, raw_vat_amount, date_str, time_str)
        .map(|report| report.payload)
}

/// Generates the payload and reports the normalized fields and fallbacks.
pub fn generate_zatca_qr_report_in<Z: LocalZone + ?Sized>(
    zone: &Z,
    seller: &str,
    raw_vat: &str,
    raw_total: &str,
    raw_vat_amount: &str,
    date_str: &str,
    time_str: &str,
) -> CoreResult<QrPayloadReport> {
    let date = parse_invoice_date(date_str)?;
    let time = parse_invoice_time(time_str)?;

    let vat_number = normalize_vat(raw_vat);
    validate_vat_number(&vat_number)?;

    let seller_name = normalize_seller(seller)?;

    let timestamp = to_utc_iso_timestamp_in(zone, date, time);
    let total = normalize_amount(raw_total);
    let vat_amount = normalize_amount(raw_vat_amount);

    let timestamp_fallback = timestamp.is_fallback();
    let total_fallback = total.is_fallback();
    let vat_fallback = vat_amount.is_fallback();

    let fields = InvoiceQrFields {
        seller_name,
        vat_number,
        timestamp: timestamp.into_value(),
        total: total.into_value(),
        vat_amount: vat_amount.into_value(),
    };

    let bytes = encode_fields(&fields)?;

    Ok(QrPayloadReport {
        payload: QrPayload::from_bytes(bytes),
        fields,
        total_fallback,
        vat_fallback,
        timestamp_fallback,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
