//! # Error Types
//!
//! Domain-specific error types for fatoora-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  fatoora-core errors (this file)                                       │
//! │  ├── CoreError        - Payload, TLV and transcoding failures          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  fatoora-render errors (separate crate)                                │
//! │  └── RenderError      - Image / PDF collaborator failures              │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── CliError         - What the terminal sees (code + message)        │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CliError → stderr / JSON          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Is NOT an Error
//! An unparseable monetary amount never produces an error. It is coerced to
//! `0.00` and reported through [`crate::normalize::Normalized::Fallback`].

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised while building or reading a ZATCA QR payload.
///
/// Every variant is terminal: no partial payload is ever returned
/// alongside an error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The VAT registration number does not have exactly 15 digits
    /// once every non-digit character has been stripped.
    ///
    /// ## User Workflow
    /// ```text
    /// Input: "SA-12345"
    ///      │
    ///      ▼
    /// normalize_vat → "12345" (5 digits)
    ///      │
    ///      ▼
    /// InvalidVatLength { length: 5 }
    ///      │
    ///      ▼
    /// UI shows: "VAT number must be 15 digits"
    /// ```
    #[error("VAT number must be 15 digits, got {length}")]
    InvalidVatLength { length: usize },

    /// A date or time input did not match its strict format.
    #[error("Invalid {field} '{value}': expected {expected}")]
    InvalidDateTime {
        field: String,
        value: String,
        expected: String,
    },

    /// A TLV value exceeds the single-byte length limit.
    ///
    /// The value is never truncated: a truncated seller name would
    /// still scan, silently carrying the wrong data.
    #[error("TLV value for tag {tag} is {length} bytes, maximum is 255")]
    ValueTooLarge { tag: u8, length: usize },

    /// Tag 0 is reserved and cannot be encoded.
    #[error("TLV tag must be between 1 and 255, got {0}")]
    InvalidTag(u8),

    /// The TLV byte stream ended in the middle of a field.
    #[error("TLV data truncated at offset {offset}: needed {needed} more bytes")]
    TruncatedTlv { offset: usize, needed: usize },

    /// A decoded payload did not carry the five ZATCA tags in order.
    #[error("Expected TLV tag {expected} at position {position}, found {found:?}")]
    UnexpectedTag {
        position: usize,
        expected: u8,
        found: Option<u8>,
    },

    /// A decoded TLV value is not valid UTF-8.
    #[error("TLV value for tag {tag} is not valid UTF-8")]
    InvalidUtf8 { tag: u8 },

    /// The text handed to the base64 decoder is not standard base64.
    #[error("Invalid base64 payload: {0}")]
    InvalidBase64(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Used for early validation before any encoding runs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., not a number, not a date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates a Required error for the named field.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    /// Creates an InvalidFormat error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InvalidVatLength { length: 5 };
        assert_eq!(err.to_string(), "VAT number must be 15 digits, got 5");

        let err = CoreError::ValueTooLarge {
            tag: 1,
            length: 300,
        };
        assert_eq!(
            err.to_string(),
            "TLV value for tag 1 is 300 bytes, maximum is 255"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::required("seller name");
        assert_eq!(err.to_string(), "seller name is required");

        let err = ValidationError::OutOfRange {
            field: "vat rate".to_string(),
            min: 0,
            max: 10000,
        };
        assert_eq!(err.to_string(), "vat rate must be between 0 and 10000");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::required("seller name").into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
