//! # Code128 Renderer
//!
//! Renders sanitized text as a Code128 (character set B) barcode PNG sized
//! for a 1.86 in × 0.34 in label at 600 DPI.
//!
//! ```text
//! BarcodeText ──► module bits ──► 1 px per module, 1 px tall
//!                                        │
//!                                        ▼
//!                  nearest-neighbour resize ──► 1116 × 204 greyscale
//!                                        │
//!                                        ▼
//!                          PNG with pHYs = 600 DPI (23622 px/m)
//! ```
//!
//! No human-readable line and no quiet zone are drawn; the label stock
//! provides both.

use barcoders::sym::code128::Code128;
use fatoora_core::barcode::BarcodeText;
use image::imageops::{self, FilterType};
use image::{GrayImage, Luma};
use tracing::debug;

use crate::error::{RenderError, RenderResult};
use crate::RasterImage;

/// Printer resolution written into the PNG.
pub const LABEL_DPI: u32 = 600;

/// Label width in pixels (1.86 in at 600 DPI).
pub const LABEL_WIDTH_PX: u32 = 1116;

/// Label height in pixels (0.34 in at 600 DPI).
pub const LABEL_HEIGHT_PX: u32 = 204;

/// Selects Code128 character set B in the barcoders input.
const CHARSET_B: char = 'Ɓ';

const METERS_PER_INCH: f64 = 0.0254;

/// Renders `text` as a label-sized Code128 PNG.
pub fn render_code128(text: &BarcodeText) -> RenderResult<RasterImage> {
    let modules = encode_modules(text)?;
    debug!(text = %text.as_str(), modules = modules.len(), "Encoded Code128 symbol");

    let width = u32::try_from(modules.len())
        .map_err(|_| RenderError::Code128("symbol too wide".to_string()))?;
    let strip = GrayImage::from_fn(width, 1, |x, _| {
        if modules[x as usize] == 1 {
            Luma([0])
        } else {
            Luma([255])
        }
    });
    let label = imageops::resize(&strip, LABEL_WIDTH_PX, LABEL_HEIGHT_PX, FilterType::Nearest);

    let png = encode_png_with_dpi(&label, LABEL_DPI)?;
    Ok(RasterImage {
        png,
        width: LABEL_WIDTH_PX,
        height: LABEL_HEIGHT_PX,
    })
}

/// Module pattern of the symbol, one entry per module: `1` bar, `0` space.
pub fn encode_modules(text: &BarcodeText) -> RenderResult<Vec<u8>> {
    let mut data = String::with_capacity(text.as_str().len() + 2);
    data.push(CHARSET_B);
    data.push_str(text.as_str());

    let symbol = Code128::new(data).map_err(|e| RenderError::Code128(format!("{e:?}")))?;
    Ok(symbol.encode())
}

/// Encodes a greyscale image as PNG with a physical resolution chunk.
fn encode_png_with_dpi(image: &GrayImage, dpi: u32) -> RenderResult<Vec<u8>> {
    let pixels_per_meter = (f64::from(dpi) / METERS_PER_INCH).round() as u32;

    let mut out = Vec::new();
    let mut encoder = png::Encoder::new(&mut out, image.width(), image.height());
    encoder.set_color(png::ColorType::Grayscale);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_pixel_dims(Some(png::PixelDimensions {
        xppu: pixels_per_meter,
        yppu: pixels_per_meter,
        unit: png::Unit::Meter,
    }));

    let mut writer = encoder.write_header()?;
    writer.write_image_data(image.as_raw())?;
    writer.finish()?;

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(raw: &str) -> BarcodeText {
        BarcodeText::sanitize(raw).unwrap()
    }

    #[test]
    fn test_modules_start_and_stop() {
        let modules = encode_modules(&text("INV-42")).unwrap();
        // Start B is 11010010000, stop pattern ends 1100011101011
        assert_eq!(&modules[..11], &[1, 1, 0, 1, 0, 0, 1, 0, 0, 0, 0]);
        assert_eq!(&modules[modules.len() - 2..], &[1, 1]);
    }

    #[test]
    fn test_module_count_grows_with_text() {
        let short = encode_modules(&text("A")).unwrap();
        let long = encode_modules(&text("AB")).unwrap();
        assert_eq!(long.len() - short.len(), 11);
    }

    #[test]
    fn test_text_with_control_characters_renders() {
        let with_tab = render_code128(&text("INV\t42")).unwrap();
        let plain = render_code128(&text("INV42")).unwrap();
        assert_eq!(with_tab.png, plain.png);
    }

    #[test]
    fn test_label_dimensions() {
        let raster = render_code128(&text("123456")).unwrap();
        assert_eq!((raster.width, raster.height), (1116, 204));

        let decoded = image::load_from_memory(&raster.png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (1116, 204));
    }

    #[test]
    fn test_png_carries_600_dpi() {
        let raster = render_code128(&text("123456")).unwrap();
        let decoder = png::Decoder::new(raster.png.as_slice());
        let reader = decoder.read_info().unwrap();
        let dims = reader.info().pixel_dims.unwrap();
        assert_eq!(dims.xppu, 23622);
        assert_eq!(dims.yppu, 23622);
        assert_eq!(dims.unit, png::Unit::Meter);
    }

    #[test]
    fn test_no_quiet_zone() {
        let raster = render_code128(&text("123456")).unwrap();
        let decoded = image::load_from_memory(&raster.png).unwrap().to_luma8();
        // The first module is a bar, so the left edge is dark
        assert_eq!(decoded.get_pixel(0, 0).0, [0]);
    }
}
