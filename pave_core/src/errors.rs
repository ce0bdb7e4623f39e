//! # Error Types
//!
//! Structured error types for pave_core. Every failure of a design run maps
//! to one variant, and every variant falls into one of four categories the
//! driver reports on: input not found, missing field, domain error, or an
//! unexpected failure.
//!
//! ## Example
//!
//! ```rust
//! use pave_core::errors::{CalcError, CalcResult, ErrorCategory};
//!
//! fn validate_cbr(cbr: f64) -> CalcResult<()> {
//!     if cbr <= 0.0 {
//!         return Err(CalcError::domain_error(
//!             "CBR",
//!             cbr.to_string(),
//!             "CBR must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! let err = validate_cbr(0.0).unwrap_err();
//! assert_eq!(err.category(), ErrorCategory::DomainError);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for pave_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for design operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// The design input file does not exist
    #[error("Input file '{path}' not found in the working directory: {working_dir}")]
    InputNotFound { path: String, working_dir: String },

    /// A required key is absent from the input document
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// A numeric precondition of a design formula is violated
    #[error("Domain error for '{quantity}': {value} - {reason}")]
    DomainError {
        quantity: String,
        value: String,
        reason: String,
    },

    /// A value is present but has the wrong type, or a setting is out of range
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

/// The four failure classes a design run distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCategory {
    InputNotFound,
    MissingField,
    DomainError,
    Unexpected,
}

impl CalcError {
    /// Create an InputNotFound error
    pub fn input_not_found(path: impl Into<String>, working_dir: impl Into<String>) -> Self {
        CalcError::InputNotFound {
            path: path.into(),
            working_dir: working_dir.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create a DomainError
    pub fn domain_error(quantity: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::DomainError {
            quantity: quantity.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Which failure class this error belongs to
    pub fn category(&self) -> ErrorCategory {
        match self {
            CalcError::InputNotFound { .. } => ErrorCategory::InputNotFound,
            CalcError::MissingField { .. } => ErrorCategory::MissingField,
            CalcError::DomainError { .. } => ErrorCategory::DomainError,
            CalcError::InvalidInput { .. }
            | CalcError::FileError { .. }
            | CalcError::SerializationError { .. } => ErrorCategory::Unexpected,
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InputNotFound { .. } => "INPUT_NOT_FOUND",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::DomainError { .. } => "DOMAIN_ERROR",
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }

    /// A hint telling the user how to fix the problem, when there is one
    pub fn remediation(&self) -> Option<String> {
        match self {
            CalcError::InputNotFound { path, .. } => Some(format!(
                "Make sure '{}' is in the working directory or pass the correct path.",
                path
            )),
            CalcError::MissingField { field } => Some(format!(
                "Add the '{}' key to the input file.",
                field
            )),
            CalcError::SerializationError { .. } => {
                Some("Check that the input file is valid JSON.".to_string())
            }
            _ => None,
        }
    }
}
