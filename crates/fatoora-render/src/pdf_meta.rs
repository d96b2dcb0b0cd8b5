//! # PDF Metadata
//!
//! Reads and replaces the document information dictionary of a PDF.
//!
//! ## Read / Write Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  read_metadata                                                          │
//! │    trailer /Info ──► dictionary ──► { "Title": "...", ... }             │
//! │                        │                                                │
//! │                        ├── text strings: UTF-16BE (BOM) or PDFDoc       │
//! │                        └── CreationDate / ModDate → dd/mm/YYYY, HH:MM:SS│
//! │                                                     (UTC when offset)   │
//! │                                                                         │
//! │  write_metadata                                                         │
//! │    { "/Title": "...", ... } ──► strip leading '/' from keys             │
//! │                        │                                                │
//! │                        ├── non-ASCII → UTF-16BE hex string with BOM     │
//! │                        ├── display dates → D:...+00'00'                 │
//! │                        └── replaces /Info as a whole                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Keys missing from the mapping handed to [`write_metadata`] are removed
//! from the document.

use std::collections::BTreeMap;

use chrono::FixedOffset;
use fatoora_core::pdf_date::{display_to_pdf_date, pdf_date_to_display};
use lopdf::{Dictionary, Document, Object, ObjectId, StringFormat};
use tracing::debug;

use crate::error::{RenderError, RenderResult};

/// Info dictionary contents, keyed without the leading `/`.
pub type PdfMetadata = BTreeMap<String, String>;

/// Keys whose values are PDF dates.
const DATE_KEYS: [&str; 2] = ["CreationDate", "ModDate"];

const UTF16BE_BOM: [u8; 2] = [0xFE, 0xFF];
const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

// =============================================================================
// Reading
// =============================================================================

/// Reads the Info dictionary. A document without one yields an empty map.
///
/// Values that are not scalars (arrays, nested dictionaries, streams) are
/// skipped.
pub fn read_metadata(pdf: &[u8]) -> RenderResult<PdfMetadata> {
    let doc = Document::load_mem(pdf)?;

    let Some(info) = info_dictionary(&doc)? else {
        debug!("PDF has no document info dictionary");
        return Ok(PdfMetadata::new());
    };

    let mut metadata = PdfMetadata::new();
    for (key, value) in info.iter() {
        let key = String::from_utf8_lossy(key).into_owned();
        let Some(text) = scalar_text(&doc, value) else {
            debug!(key = %key, "Skipping non-scalar metadata value");
            continue;
        };

        let text = if DATE_KEYS.contains(&key.as_str()) {
            pdf_date_to_display(&text).unwrap_or(text)
        } else {
            text
        };
        metadata.insert(key, text);
    }

    debug!(entries = metadata.len(), "Read PDF metadata");
    Ok(metadata)
}

fn info_dictionary(doc: &Document) -> RenderResult<Option<&Dictionary>> {
    let Ok(entry) = doc.trailer.get(b"Info") else {
        return Ok(None);
    };

    let object = match entry {
        Object::Reference(id) => doc.get_object(*id)?,
        direct => direct,
    };

    match object {
        Object::Dictionary(dict) => Ok(Some(dict)),
        Object::Null => Ok(None),
        other => Err(RenderError::MalformedInfo(format!(
            "expected a dictionary, found {}",
            object_kind(other)
        ))),
    }
}

fn object_kind(object: &Object) -> &'static str {
    match object {
        Object::Null => "null",
        Object::Boolean(_) => "boolean",
        Object::Integer(_) => "integer",
        Object::Real(_) => "real",
        Object::Name(_) => "name",
        Object::String(..) => "string",
        Object::Array(_) => "array",
        Object::Dictionary(_) => "dictionary",
        Object::Stream(_) => "stream",
        Object::Reference(_) => "reference",
    }
}

/// Renders a scalar object as text, following one level of reference.
fn scalar_text(doc: &Document, object: &Object) -> Option<String> {
    match object {
        Object::String(bytes, _) => Some(decode_text_string(bytes)),
        Object::Name(name) => Some(String::from_utf8_lossy(name).into_owned()),
        Object::Integer(n) => Some(n.to_string()),
        Object::Real(r) => Some(r.to_string()),
        Object::Boolean(b) => Some(b.to_string()),
        Object::Reference(id) => match doc.get_object(*id) {
            Ok(Object::Reference(_)) | Err(_) => None,
            Ok(target) => scalar_text(doc, target),
        },
        _ => None,
    }
}

/// Decodes a PDF text string: UTF-16BE or UTF-8 when marked by a BOM,
/// otherwise single-byte (PDFDocEncoding, read as Latin-1).
pub fn decode_text_string(bytes: &[u8]) -> String {
    if let Some(body) = bytes.strip_prefix(&UTF16BE_BOM) {
        let units: Vec<u16> = body
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }
    if let Some(body) = bytes.strip_prefix(&UTF8_BOM) {
        return String::from_utf8_lossy(body).into_owned();
    }
    bytes.iter().map(|&b| char::from(b)).collect()
}

// =============================================================================
// Writing
// =============================================================================

/// Replaces the Info dictionary with exactly `metadata` and returns the
/// saved document.
pub fn write_metadata(pdf: &[u8], metadata: &PdfMetadata) -> RenderResult<Vec<u8>> {
    let mut doc = Document::load_mem(pdf)?;

    let mut info = Dictionary::new();
    for (raw_key, value) in metadata {
        let key = raw_key.strip_prefix('/').unwrap_or(raw_key);
        let value = if DATE_KEYS.contains(&key) {
            normalize_date_value(value)
        } else {
            value.clone()
        };
        info.set(key.as_bytes().to_vec(), encode_text_string(&value));
    }

    let info_id = existing_info_id(&doc);
    match info_id {
        Some(id) => {
            doc.objects.insert(id, Object::Dictionary(info));
        }
        None => {
            let id = doc.add_object(Object::Dictionary(info));
            doc.trailer.set("Info", Object::Reference(id));
        }
    }
    debug!(entries = metadata.len(), reused_object = info_id.is_some(), "Replaced PDF metadata");

    let mut out = Vec::new();
    doc.save_to(&mut out)?;
    Ok(out)
}

fn existing_info_id(doc: &Document) -> Option<ObjectId> {
    match doc.trailer.get(b"Info") {
        Ok(Object::Reference(id)) => Some(*id),
        _ => None,
    }
}

/// Display-form dates become PDF dates in UTC; anything else is kept as
/// typed.
fn normalize_date_value(value: &str) -> String {
    match FixedOffset::east_opt(0) {
        Some(utc) => display_to_pdf_date(value, utc).unwrap_or_else(|_| value.to_string()),
        None => value.to_string(),
    }
}

/// ASCII as a literal string, anything else as UTF-16BE with BOM.
pub fn encode_text_string(text: &str) -> Object {
    if text.is_ascii() {
        return Object::String(text.as_bytes().to_vec(), StringFormat::Literal);
    }

    let mut bytes = UTF16BE_BOM.to_vec();
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fatoora_core::pdf_date::PdfDate;
    use lopdf::dictionary;

    fn sample_pdf(info: Option<Dictionary>) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        if let Some(info) = info {
            let info_id = doc.add_object(info);
            doc.trailer.set("Info", info_id);
        }

        let mut out = Vec::new();
        doc.save_to(&mut out).unwrap();
        out
    }

    fn meta(entries: &[(&str, &str)]) -> PdfMetadata {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_read_without_info() {
        assert!(read_metadata(&sample_pdf(None)).unwrap().is_empty());
    }

    #[test]
    fn test_read_transcodes_dates() {
        let mut info = Dictionary::new();
        info.set("Title", Object::string_literal("Invoice 42"));
        info.set("CreationDate", Object::string_literal("D:20240315143005+03'00'"));
        info.set("ModDate", Object::string_literal("not a date"));

        let metadata = read_metadata(&sample_pdf(Some(info))).unwrap();
        assert_eq!(metadata["Title"], "Invoice 42");
        assert_eq!(metadata["CreationDate"], "15/03/2024, 11:30:05");
        assert_eq!(metadata["ModDate"], "not a date");
    }

    fn raw_string(pdf: &[u8], key: &[u8]) -> String {
        let doc = Document::load_mem(pdf).unwrap();
        let info = info_dictionary(&doc).unwrap().unwrap();
        match info.get(key).unwrap() {
            Object::String(bytes, _) => decode_text_string(bytes),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_unedited_round_trip_keeps_date_instants() {
        let mut info = Dictionary::new();
        info.set("CreationDate", Object::string_literal("D:20240315143005+03'00'"));
        info.set("ModDate", Object::string_literal("D:20240101013000-05'30'"));
        let pdf = sample_pdf(Some(info));

        let written = write_metadata(&pdf, &read_metadata(&pdf).unwrap()).unwrap();

        assert_eq!(raw_string(&written, b"CreationDate"), "D:20240315113005+00'00'");
        assert_eq!(raw_string(&written, b"ModDate"), "D:20240101070000+00'00'");
        let instant = |text: &str| PdfDate::parse(text).unwrap().utc_reading();
        assert_eq!(
            instant(&raw_string(&written, b"CreationDate")),
            instant("D:20240315143005+03'00'")
        );
    }

    #[test]
    fn test_write_then_read() {
        let pdf = sample_pdf(None);
        let written = write_metadata(
            &pdf,
            &meta(&[
                ("/Title", "فاتورة"),
                ("Author", "Acme"),
                ("CreationDate", "01/01/2024, 12:00:00"),
            ]),
        )
        .unwrap();

        let metadata = read_metadata(&written).unwrap();
        assert_eq!(metadata.len(), 3);
        assert_eq!(metadata["Title"], "فاتورة");
        assert_eq!(metadata["Author"], "Acme");
        assert_eq!(metadata["CreationDate"], "01/01/2024, 12:00:00");
    }

    #[test]
    fn test_write_replaces_whole_dictionary() {
        let mut info = Dictionary::new();
        info.set("Title", Object::string_literal("Old"));
        info.set("Producer", Object::string_literal("Somebody"));
        let pdf = sample_pdf(Some(info));

        let written = write_metadata(&pdf, &meta(&[("Title", "New")])).unwrap();
        let metadata = read_metadata(&written).unwrap();
        assert_eq!(metadata, meta(&[("Title", "New")]));
    }

    #[test]
    fn test_write_encodes_dates_in_pdf_form() {
        let pdf = sample_pdf(None);
        let written = write_metadata(
            &pdf,
            &meta(&[
                ("CreationDate", "15/03/2024, 14:30:05"),
                ("ModDate", "D:20240101000000+03'00'"),
            ]),
        )
        .unwrap();

        assert_eq!(raw_string(&written, b"CreationDate"), "D:20240315143005+00'00'");
        assert_eq!(raw_string(&written, b"ModDate"), "D:20240101000000+03'00'");
    }

    #[test]
    fn test_text_string_encoding() {
        match encode_text_string("Acme") {
            Object::String(bytes, StringFormat::Literal) => assert_eq!(bytes, b"Acme"),
            other => panic!("unexpected {:?}", other),
        }
        match encode_text_string("é") {
            Object::String(bytes, StringFormat::Hexadecimal) => {
                assert_eq!(bytes, vec![0xFE, 0xFF, 0x00, 0xE9]);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_decode_text_string_variants() {
        assert_eq!(decode_text_string(&[0xFE, 0xFF, 0x00, 0x41]), "A");
        assert_eq!(decode_text_string(&[0xEF, 0xBB, 0xBF, b'o', b'k']), "ok");
        assert_eq!(decode_text_string(&[0xE9]), "é");
    }

    #[test]
    fn test_garbage_is_pdf_error() {
        assert!(matches!(read_metadata(b"not a pdf"), Err(RenderError::Pdf(_))));
    }
}
