//! # fatoora-render: Image and PDF Collaborators
//!
//! Turns fatoora-core values into artifacts: QR and Code128 PNGs, and PDF
//! documents with edited metadata. Each renderer is a thin wrapper over an
//! ecosystem codec.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Fatoora Render Flow                              │
//! │                                                                         │
//! │  fatoora-core (QrPayload, BarcodeText, PdfDate)                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 fatoora-render (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │      qr       │    │    code128    │    │   pdf_meta   │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ qrcode        │    │ barcoders     │    │ lopdf        │  │   │
//! │  │   │ image (PNG)   │    │ png (pHYs)    │    │ Info dict    │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  fatoora-cli writes the bytes to disk                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`qr`] - QR symbol to PNG
//! - [`code128`] - Code128 symbol to PNG
//! - [`pdf_meta`] - Document info dictionary read/write
//! - [`error`] - Render error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use fatoora_render::{render_qr, QrRenderer, QrRenderConfig};
//!
//! let payload = fatoora_core::generate_zatca_qr_payload(
//!     "Acme", "123456789012345", "115", "15", "2024-01-01", "12:00:00",
//! )?;
//! let image = QrRenderer::new(QrRenderConfig::default()).render_payload(&payload)?;
//! std::fs::write("invoice-qr.png", &image.png)?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod code128;
pub mod error;
pub mod pdf_meta;
pub mod qr;

// =============================================================================
// Re-exports
// =============================================================================

pub use code128::render_code128;
pub use error::{RenderError, RenderResult};
pub use pdf_meta::{read_metadata, write_metadata, PdfMetadata};
pub use qr::{render_qr, QrRenderConfig, QrRenderer};

/// An encoded raster image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    /// PNG file bytes.
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
}
