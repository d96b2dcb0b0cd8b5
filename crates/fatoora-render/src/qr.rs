//! # QR Renderer
//!
//! Renders text (normally the base64 payload) as a PNG QR symbol.
//!
//! ```text
//! text ──► QrCode v14 / level M ──► 2 px modules + 4-module quiet zone
//!                                          │   (73 + 8) × 2 = 162 px
//!                                          ▼
//!                           nearest-neighbour resize ──► 640 × 640 RGB PNG
//! ```
//!
//! The version is fixed. A payload that does not fit is an error rather than
//! a denser symbol, since printed receipts reserve space for one size.

use std::io::Cursor;

use fatoora_core::QrPayload;
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, Luma};
use qrcode::{EcLevel, QrCode, Version};
use tracing::debug;

use crate::error::RenderResult;
use crate::RasterImage;

/// QR symbol parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QrRenderConfig {
    /// Symbol version (1..=40).
    pub version: i16,

    /// Side of one module before scaling, in pixels.
    pub module_px: u32,

    /// Side of the final square image, in pixels.
    pub size_px: u32,
}

impl Default for QrRenderConfig {
    fn default() -> Self {
        QrRenderConfig {
            version: 14,
            module_px: 2,
            size_px: 640,
        }
    }
}

impl QrRenderConfig {
    /// Default symbol with a custom output size.
    pub fn with_size(size_px: u32) -> Self {
        QrRenderConfig {
            size_px,
            ..Default::default()
        }
    }
}

/// Stateless QR renderer.
#[derive(Debug, Clone, Default)]
pub struct QrRenderer {
    config: QrRenderConfig,
}

impl QrRenderer {
    pub fn new(config: QrRenderConfig) -> Self {
        QrRenderer { config }
    }

    pub fn config(&self) -> &QrRenderConfig {
        &self.config
    }

    /// Renders `text` at error correction level M.
    pub fn render(&self, text: &str) -> RenderResult<RasterImage> {
        let QrRenderConfig {
            version,
            module_px,
            size_px,
        } = self.config;

        debug!(version, bytes = text.len(), "Encoding QR symbol");
        let code = QrCode::with_version(text.as_bytes(), Version::Normal(version), EcLevel::M)?;

        let symbol = code
            .render::<Luma<u8>>()
            .quiet_zone(true)
            .module_dimensions(module_px, module_px)
            .build();

        let scaled = imageops::resize(&symbol, size_px, size_px, FilterType::Nearest);
        let rgb = DynamicImage::ImageLuma8(scaled).to_rgb8();

        let mut png = Vec::new();
        DynamicImage::ImageRgb8(rgb).write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

        debug!(size_px, png_bytes = png.len(), "Rendered QR image");
        Ok(RasterImage {
            png,
            width: size_px,
            height: size_px,
        })
    }

    /// Renders the base64 text of a payload.
    pub fn render_payload(&self, payload: &QrPayload) -> RenderResult<RasterImage> {
        self.render(&payload.base64)
    }
}

/// Renders `text` with the default parameters.
pub fn render_qr(text: &str) -> RenderResult<RasterImage> {
    QrRenderer::default().render(text)
}
