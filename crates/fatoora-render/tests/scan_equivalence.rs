//! End-to-end check: a rendered QR image scans back to the exact base64
//! text, and that text decodes to the invoice fields it was built from.

use chrono::{FixedOffset, Utc};
use fatoora_core::payload::{generate_zatca_qr_payload_in, generate_zatca_qr_report_in};
use fatoora_core::QrPayload;
use fatoora_render::{render_qr, QrRenderConfig, QrRenderer, RasterImage};

fn scan(raster: &RasterImage) -> String {
    let luma = image::load_from_memory(&raster.png).unwrap().to_luma8();
    let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(
        luma.width() as usize,
        luma.height() as usize,
        |x, y| luma.get_pixel(x as u32, y as u32).0[0],
    );

    let grids = prepared.detect_grids();
    assert_eq!(grids.len(), 1, "expected exactly one QR symbol");
    let (_meta, content) = grids[0].decode().unwrap();
    content
}

#[test]
fn test_scanned_text_equals_payload_base64() {
    let payload = generate_zatca_qr_payload_in(
        &Utc,
        "Acme",
        "123456789012345",
        "115.00",
        "15.00",
        "2024-01-01",
        "12:00:00",
    )
    .unwrap();

    let raster = QrRenderer::default().render_payload(&payload).unwrap();
    assert_eq!(scan(&raster), payload.base64);
}

#[test]
fn test_scanned_arabic_seller_decodes_to_fields() {
    let riyadh = FixedOffset::east_opt(3 * 3600).unwrap();
    let report = generate_zatca_qr_report_in(
        &riyadh,
        "شركة أكمي للتجارة",
        "300012345600003",
        "1150.505",
        "150.07",
        "2024-06-30",
        "23:59:59",
    )
    .unwrap();

    let scanned = scan(&render_qr(&report.payload.base64).unwrap());
    let decoded = QrPayload::from_base64(&scanned).unwrap();

    assert_eq!(decoded.bytes, report.payload.bytes);
    let fields = decoded.decode_fields().unwrap();
    assert_eq!(fields, report.fields);
    assert_eq!(fields.timestamp, "2024-06-30T20:59:59Z");
    assert_eq!(fields.total, "1150.51");
}

#[test]
fn test_smaller_image_still_scans() {
    let payload = generate_zatca_qr_payload_in(
        &Utc,
        "Acme",
        "123456789012345",
        "1",
        "0.13",
        "2024-02-29",
        "08:30:00",
    )
    .unwrap();

    // 81 modules at 4 px each
    let renderer = QrRenderer::new(QrRenderConfig::with_size(324));
    let raster = renderer.render_payload(&payload).unwrap();
    assert_eq!(scan(&raster), payload.base64);
}
