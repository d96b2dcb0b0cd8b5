//! # Render Error Types
//!
//! Error types for image and PDF operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  Codec error (qrcode / barcoders / image / png / lopdf)                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  RenderError (this module) ← Adds context and categorization           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CliError (in CLI app) ← { code, message } for the terminal            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use fatoora_core::CoreError;
use thiserror::Error;

/// Image and PDF operation errors.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The data does not fit the QR symbol.
    ///
    /// ## When This Occurs
    /// - The text exceeds the capacity of the fixed version at level M
    ///
    /// The symbol is never grown to fit: the printed layout assumes one size.
    #[error("QR encoding failed: {0}")]
    Qr(String),

    /// The Code128 encoder rejected its input.
    #[error("Code128 encoding failed: {0}")]
    Code128(String),

    /// Raster scaling or PNG encoding through the `image` crate failed.
    #[error("Image encoding failed: {0}")]
    Image(#[from] image::ImageError),

    /// Direct PNG encoding failed.
    #[error("PNG encoding failed: {0}")]
    Png(#[from] png::EncodingError),

    /// The PDF could not be parsed or saved.
    ///
    /// ## When This Occurs
    /// - Bytes are not a PDF
    /// - Cross-reference table is damaged beyond lopdf's recovery
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// The trailer's Info entry points at something other than a dictionary.
    #[error("PDF document info is malformed: {0}")]
    MalformedInfo(String),

    /// A metadata value failed to transcode.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Writing the encoded output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<qrcode::types::QrError> for RenderError {
    fn from(err: qrcode::types::QrError) -> Self {
        RenderError::Qr(err.to_string())
    }
}

/// Result alias for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qr_error_message() {
        let err: RenderError = qrcode::types::QrError::DataTooLong.into();
        assert!(matches!(err, RenderError::Qr(_)));
        assert!(err.to_string().starts_with("QR encoding failed"));
    }

    #[test]
    fn test_core_error_is_transparent() {
        let err: RenderError = CoreError::InvalidTag(0).into();
        assert_eq!(err.to_string(), CoreError::InvalidTag(0).to_string());
    }
}
