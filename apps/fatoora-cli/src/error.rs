//! # CLI Error Type
//!
//! Unified error type for subcommands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in fatoora                                │
//! │                                                                         │
//! │  Subcommand                                                             │
//! │  Result<(), CliError>                                                   │
//! │         │                                                               │
//! │         ├── CoreError::InvalidVatLength ──────► VALIDATION_ERROR       │
//! │         ├── CoreError::TruncatedTlv ──────────► INVALID_PAYLOAD        │
//! │         ├── RenderError::Qr ──────────────────► RENDER_ERROR           │
//! │         ├── RenderError::Pdf ─────────────────► PDF_ERROR              │
//! │         └── std::io::Error ───────────────────► IO_ERROR               │
//! │                                                                         │
//! │  stderr:  error[VALIDATION_ERROR]: VAT number must be 15 digits, got 5 │
//! │  --json:  { "code": "VALIDATION_ERROR", "message": "..." }             │
//! │  exit status 1                                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use fatoora_core::{CoreError, ValidationError};
use fatoora_render::RenderError;
use serde::Serialize;

use crate::config::ConfigError;

/// Error returned from subcommands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "VAT number must be 15 digits, got 5"
/// }
/// ```
#[derive(Debug, Clone, Serialize, thiserror::Error)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct CliError {
    /// Machine-readable error code for scripts
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes for CLI failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input validation failed
    ValidationError,

    /// A scanned or pasted payload is not a valid ZATCA payload
    InvalidPayload,

    /// Image encoding failed
    RenderError,

    /// PDF parsing or saving failed
    PdfError,

    /// File system access failed
    IoError,

    /// Configuration could not be loaded
    ConfigError,

    /// Unexpected failure
    Internal,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::InvalidPayload => "INVALID_PAYLOAD",
            ErrorCode::RenderError => "RENDER_ERROR",
            ErrorCode::PdfError => "PDF_ERROR",
            ErrorCode::IoError => "IO_ERROR",
            ErrorCode::ConfigError => "CONFIG_ERROR",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl CliError {
    /// Creates a new CLI error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        CliError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an I/O error naming the path involved.
    pub fn io(path: &std::path::Path, err: std::io::Error) -> Self {
        CliError::new(ErrorCode::IoError, format!("{}: {}", path.display(), err))
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::Internal, message)
    }
}

impl From<&ConfigError> for CliError {
    fn from(err: &ConfigError) -> Self {
        CliError::new(ErrorCode::ConfigError, err.to_string())
    }
}

/// Converts core errors to CLI errors.
impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::InvalidVatLength { .. }
            | CoreError::InvalidDateTime { .. }
            | CoreError::ValueTooLarge { .. }
            | CoreError::InvalidTag(_)
            | CoreError::Validation(_) => ErrorCode::ValidationError,

            CoreError::TruncatedTlv { .. }
            | CoreError::UnexpectedTag { .. }
            | CoreError::InvalidUtf8 { .. }
            | CoreError::InvalidBase64(_) => ErrorCode::InvalidPayload,
        };
        CliError::new(code, err.to_string())
    }
}

impl From<ValidationError> for CliError {
    fn from(err: ValidationError) -> Self {
        CliError::validation(err.to_string())
    }
}

/// Converts render errors to CLI errors.
impl From<RenderError> for CliError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::Core(core) => core.into(),
            RenderError::Pdf(_) | RenderError::MalformedInfo(_) => {
                CliError::new(ErrorCode::PdfError, err.to_string())
            }
            RenderError::Io(_) => CliError::new(ErrorCode::IoError, err.to_string()),
            RenderError::Qr(_) | RenderError::Code128(_) | RenderError::Image(_) | RenderError::Png(_) => {
                CliError::new(ErrorCode::RenderError, err.to_string())
            }
        }
    }
}
