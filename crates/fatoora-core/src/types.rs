//! # Domain Types
//!
//! Core domain types for the ZATCA simplified-invoice QR code.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ InvoiceQrFields │   │    ZatcaTag     │   │   QrPayload     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  seller_name    │   │  1 SellerName   │   │  base64 (text)  │       │
//! │  │  vat_number     │   │  2 VatNumber    │   │  bytes  (TLV)   │       │
//! │  │  timestamp      │   │  3 Timestamp    │   └─────────────────┘       │
//! │  │  total          │   │  4 InvoiceTotal │                              │
//! │  │  vat_amount     │   │  5 VatTotal     │   ┌─────────────────┐       │
//! │  └─────────────────┘   └─────────────────┘   │    VatRate      │       │
//! │                                              │  bps (u32)      │       │
//! │                                              │  1500 = 15%     │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every type here is transient: built for one encode call, then dropped.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// VAT Rate
// =============================================================================

/// VAT rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1500 bps = 15% (Saudi standard rate since July 2020)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VatRate(u32);

impl VatRate {
    /// Creates a VAT rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        VatRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Zero VAT rate (exempt and zero-rated supplies).
    #[inline]
    pub const fn zero() -> Self {
        VatRate(0)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for VatRate {
    fn default() -> Self {
        VatRate::from_bps(crate::STANDARD_VAT_RATE_BPS)
    }
}

// =============================================================================
// ZATCA Tags
// =============================================================================

/// The five TLV tags of a simplified-invoice QR payload, in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ZatcaTag {
    SellerName = 1,
    VatNumber = 2,
    Timestamp = 3,
    InvoiceTotal = 4,
    VatTotal = 5,
}

impl ZatcaTag {
    /// All tags in the order they must appear in the payload.
    pub const ALL: [ZatcaTag; 5] = [
        ZatcaTag::SellerName,
        ZatcaTag::VatNumber,
        ZatcaTag::Timestamp,
        ZatcaTag::InvoiceTotal,
        ZatcaTag::VatTotal,
    ];

    /// The byte written in the tag position.
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Human-readable field name, used in error messages and CLI output.
    pub const fn label(self) -> &'static str {
        match self {
            ZatcaTag::SellerName => "seller name",
            ZatcaTag::VatNumber => "VAT number",
            ZatcaTag::Timestamp => "timestamp",
            ZatcaTag::InvoiceTotal => "invoice total",
            ZatcaTag::VatTotal => "VAT total",
        }
    }
}

// =============================================================================
// Invoice QR Fields
// =============================================================================

/// The five normalized values carried by a ZATCA QR code.
///
/// All fields are already in canonical form when this struct exists:
/// trimmed seller, 15-digit VAT number, `YYYY-MM-DDTHH:MM:SSZ` timestamp
/// and two-fraction-digit amounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceQrFields {
    /// Tag 1.
    pub seller_name: String,

    /// Tag 2, 15 ASCII digits.
    pub vat_number: String,

    /// Tag 3, UTC.
    pub timestamp: String,

    /// Tag 4, VAT inclusive.
    pub total: String,

    /// Tag 5.
    pub vat_amount: String,
}

impl InvoiceQrFields {
    /// Pairs every value with its tag, in wire order.
    pub fn tagged_values(&self) -> [(ZatcaTag, &str); 5] {
        [
            (ZatcaTag::SellerName, self.seller_name.as_str()),
            (ZatcaTag::VatNumber, self.vat_number.as_str()),
            (ZatcaTag::Timestamp, self.timestamp.as_str()),
            (ZatcaTag::InvoiceTotal, self.total.as_str()),
            (ZatcaTag::VatTotal, self.vat_amount.as_str()),
        ]
    }
}

// =============================================================================
// QR Payload
// =============================================================================

/// The encoded payload in both of its forms.
///
/// `bytes` is the raw TLV sequence and `base64` is its text encoding.
/// The QR renderer and the copy/paste display both read from this one value,
/// so they can never disagree about the content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QrPayload {
    /// Standard padded base64 of `bytes`.
    pub base64: String,

    /// Raw TLV sequence.
    pub bytes: Vec<u8>,
}
