//! # TLV Codec
//!
//! Tag-Length-Value encoding as used by the ZATCA simplified-invoice QR code.
//!
//! ## Wire Layout
//! ```text
//! ┌─────────┬─────────┬──────────────────────────────┐
//! │ tag (1) │ len (1) │ UTF-8 value (len bytes)      │   × 5, tags 1..5
//! └─────────┴─────────┴──────────────────────────────┘
//!
//! 01 04 41 63 6D 65                      tag 1, "Acme"
//! 02 0F 31 32 33 ... 35                  tag 2, "123456789012345"
//! 03 14 32 30 32 34 ...                  tag 3, "2024-01-01T12:00:00Z"
//! ```
//!
//! No padding and no terminator. Because the length is one byte, a value
//! longer than 255 UTF-8 bytes cannot be represented and is rejected.

use crate::error::{CoreError, CoreResult};
use crate::types::{InvoiceQrFields, ZatcaTag};
use crate::MAX_TLV_VALUE_LEN;

/// One decoded TLV field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlvField {
    pub tag: u8,
    pub value: Vec<u8>,
}

impl TlvField {
    /// The value as UTF-8 text.
    pub fn value_str(&self) -> CoreResult<&str> {
        std::str::from_utf8(&self.value).map_err(|_| CoreError::InvalidUtf8 { tag: self.tag })
    }
}

// =============================================================================
// Encoding
// =============================================================================

/// Encodes a single field as `tag || len || utf8(value)`.
///
/// ## Example
/// ```rust
/// use fatoora_core::tlv::encode_tlv;
///
/// assert_eq!(encode_tlv(1, "Acme").unwrap(), vec![1, 4, b'A', b'c', b'm', b'e']);
/// assert!(encode_tlv(1, &"x".repeat(256)).is_err());
/// ```
pub fn encode_tlv(tag: u8, value: &str) -> CoreResult<Vec<u8>> {
    let mut out = Vec::with_capacity(value.len() + 2);
    write_tlv(&mut out, tag, value)?;
    Ok(out)
}

/// Appends one field to `out`; `out` is untouched on error.
fn write_tlv(out: &mut Vec<u8>, tag: u8, value: &str) -> CoreResult<()> {
    if tag == 0 {
        return Err(CoreError::InvalidTag(tag));
    }

    let bytes = value.as_bytes();
    if bytes.len() > MAX_TLV_VALUE_LEN {
        return Err(CoreError::ValueTooLarge {
            tag,
            length: bytes.len(),
        });
    }

    out.push(tag);
    out.push(bytes.len() as u8);
    out.extend_from_slice(bytes);
    Ok(())
}

/// Encodes the five invoice fields in the fixed order 1, 2, 3, 4, 5.
///
/// All-or-nothing: if any field is oversized the error names that tag and
/// no bytes are returned.
pub fn encode_invoice_payload(
    seller: &str,
    vat_digits: &str,
    iso_timestamp: &str,
    total: &str,
    vat_amount: &str,
) -> CoreResult<Vec<u8>> {
    let values = [seller, vat_digits, iso_timestamp, total, vat_amount];
    let capacity: usize = values.iter().map(|v| v.len() + 2).sum();

    let mut out = Vec::with_capacity(capacity);
    for (tag, value) in ZatcaTag::ALL.iter().zip(values) {
        write_tlv(&mut out, tag.code(), value)?;
    }
    Ok(out)
}

/// Encodes an already-normalized set of invoice fields.
pub fn encode_fields(fields: &InvoiceQrFields) -> CoreResult<Vec<u8>> {
    encode_invoice_payload(
        &fields.seller_name,
        &fields.vat_number,
        &fields.timestamp,
        &fields.total,
        &fields.vat_amount,
    )
}

// =============================================================================
// Decoding
// =============================================================================

/// Splits a TLV byte sequence into its fields.
///
/// Any tag is accepted here; [`decode_invoice_payload`] enforces the
/// ZATCA layout on top.
pub fn decode_tlv(bytes: &[u8]) -> CoreResult<Vec<TlvField>> {
    let mut fields = Vec::new();
    let mut offset = 0;

    while offset < bytes.len() {
        if offset + 2 > bytes.len() {
            return Err(CoreError::TruncatedTlv {
                offset,
                needed: offset + 2 - bytes.len(),
            });
        }

        let tag = bytes[offset];
        let len = bytes[offset + 1] as usize;
        let start = offset + 2;
        let end = start + len;

        if end > bytes.len() {
            return Err(CoreError::TruncatedTlv {
                offset,
                needed: end - bytes.len(),
            });
        }

        fields.push(TlvField {
            tag,
            value: bytes[start..end].to_vec(),
        });
        offset = end;
    }

    Ok(fields)
}

/// Decodes a ZATCA payload back into its five text fields.
///
/// Exactly tags 1..5 in order are required.
pub fn decode_invoice_payload(bytes: &[u8]) -> CoreResult<InvoiceQrFields> {
    let fields = decode_tlv(bytes)?;

    for (position, tag) in ZatcaTag::ALL.iter().enumerate() {
        let found = fields.get(position).map(|f| f.tag);
        if found != Some(tag.code()) {
            return Err(CoreError::UnexpectedTag {
                position,
                expected: tag.code(),
                found,
            });
        }
    }

    if let Some(extra) = fields.get(ZatcaTag::ALL.len()) {
        return Err(CoreError::UnexpectedTag {
            position: ZatcaTag::ALL.len(),
            expected: 0,
            found: Some(extra.tag),
        });
    }

    Ok(InvoiceQrFields {
        seller_name: fields[0].value_str()?.to_string(),
        vat_number: fields[1].value_str()?.to_string(),
        timestamp: fields[2].value_str()?.to_string(),
        total: fields[3].value_str()?.to_string(),
        vat_amount: fields[4].value_str()?.to_string(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
