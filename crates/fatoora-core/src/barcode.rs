//! # Barcode Text
//!
//! Sanitizes free text before it reaches the Code128 renderer.
//!
//! Code128 encodes ASCII only. Text typed on an Arabic keyboard routinely
//! carries Arabic-Indic digits and invisible direction marks, so:
//!
//! ```text
//! "‏١٢٣-ABC‎"  ──► transliterate ٠..٩ ──► strip bidi marks ──► drop non-ASCII ──► trim
//!                                                                   │
//!                                                                   ▼
//!                                                              "123-ABC"
//! ```
//!
//! ASCII control characters (tab, newline, DEL, ...) are dropped as well:
//! the renderer encodes in code set B, which has no symbols for them.

use serde::Serialize;

use crate::normalize::arabic_digit_value;

/// Text that is safe to hand to a Code128 renderer.
///
/// Only obtainable through [`BarcodeText::sanitize`], so a renderer taking
/// `&BarcodeText` cannot be fed unsanitized input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct BarcodeText(String);

impl BarcodeText {
    /// Sanitizes `raw`; returns `None` when nothing printable remains.
    ///
    /// ## Example
    /// ```rust
    /// use fatoora_core::barcode::BarcodeText;
    ///
    /// let text = BarcodeText::sanitize("\u{200f}١٢٣٤\u{200e}").unwrap();
    /// assert_eq!(text.as_str(), "1234");
    /// assert!(BarcodeText::sanitize("مرحبا").is_none());
    /// ```
    pub fn sanitize(raw: &str) -> Option<Self> {
        let cleaned: String = raw
            .chars()
            .map(transliterate_digit)
            .filter(|c| !is_bidi_control(*c))
            .filter(|c| c.is_ascii() && !c.is_ascii_control())
            .collect();

        let trimmed = cleaned.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(BarcodeText(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for BarcodeText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Maps Arabic-Indic digits (U+0660..U+0669) to ASCII digits.
fn transliterate_digit(c: char) -> char {
    match c {
        '\u{0660}'..='\u{0669}' => arabic_digit_value(c)
            .and_then(|d| char::from_digit(d, 10))
            .unwrap_or(c),
        _ => c,
    }
}

/// Direction marks, embeddings, overrides, isolates and the BOM.
fn is_bidi_control(c: char) -> bool {
    matches!(
        c,
        '\u{200E}' | '\u{200F}' | '\u{202A}'..='\u{202E}' | '\u{2066}'..='\u{2069}' | '\u{FEFF}'
    )
}
