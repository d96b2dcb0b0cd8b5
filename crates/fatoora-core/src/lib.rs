//! # fatoora-core: Pure Encoding Logic for the Fatoora Toolkit
//!
//! This crate builds the ZATCA (Saudi e-invoicing) simplified-invoice QR
//! payload: five TLV fields, base64 encoded. Everything here is a pure
//! function of its inputs; images, PDFs and the terminal live elsewhere.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Fatoora Toolkit Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    fatoora-cli (binary)                         │   │
//! │  │    qr ──► decode ──► vat ──► code128 ──► pdf-meta               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ fatoora-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ normalize │  │    tlv    │  │  payload  │  │    vat    │  │   │
//! │  │   │  amounts  │  │  encode   │  │  base64   │  │  split    │  │   │
//! │  │   │  UTC time │  │  decode   │  │  pipeline │  │  add      │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO IMAGES • NO FILES • PURE FUNCTIONS               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                fatoora-render (collaborators)                   │   │
//! │  │           QR PNG, Code128 PNG, PDF metadata editing             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (InvoiceQrFields, ZatcaTag, QrPayload, VatRate)
//! - [`money`] - Integer halala amounts
//! - [`normalize`] - Input normalization with explicit fallbacks
//! - [`tlv`] - Tag-Length-Value codec
//! - [`payload`] - The end-to-end generation pipeline
//! - [`vat`] - VAT calculator
//! - [`barcode`] - Code128 text sanitizing
//! - [`pdf_date`] - PDF date transcoding
//! - [`form`] - Pure form reducers
//! - [`validation`] - Strict input checks
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::Utc;
//! use fatoora_core::payload::generate_zatca_qr_payload_in;
//!
//! let payload = generate_zatca_qr_payload_in(
//!     &Utc,
//!     "Acme",
//!     "123456789012345",
//!     "115",
//!     "15",
//!     "2024-01-01",
//!     "12:00:00",
//! )
//! .unwrap();
//!
//! let fields = payload.decode_fields().unwrap();
//! assert_eq!(fields.timestamp, "2024-01-01T12:00:00Z");
//! assert_eq!(fields.total, "115.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod barcode;
pub mod error;
pub mod form;
pub mod money;
pub mod normalize;
pub mod payload;
pub mod pdf_date;
pub mod tlv;
pub mod types;
pub mod validation;
pub mod vat;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use payload::generate_zatca_qr_payload;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Digits in a Saudi VAT registration number.
pub const VAT_NUMBER_LEN: usize = 15;

/// Largest value a single-byte TLV length can describe.
pub const MAX_TLV_VALUE_LEN: usize = 255;

/// Standard Saudi VAT rate in basis points (15%).
pub const STANDARD_VAT_RATE_BPS: u32 = 1500;
