//! Error types for Strata core.
//!
//! This module defines the error hierarchy for the domain layer. All
//! errors implement the standard `std::error::Error` trait via
//! `thiserror`.
//!
//! # Error Handling Philosophy
//!
//! Strata follows Rust's explicit error handling approach:
//! - Functions that can fail return `Result<T, StrataError>`
//! - Errors are values, not control flow
//! - Errors should be handled at appropriate boundaries
//!
//! # Example
//!
//! ```
//! use strata_core::{Result, StrataError};
//!
//! fn check_collection(name: &str) -> Result<()> {
//!     if name.is_empty() {
//!         return Err(StrataError::invalid_collection(
//!             "",
//!             "Collection name cannot be empty",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_collection("products").is_ok());
//! assert!(check_collection("").is_err());
//! ```

use thiserror::Error;

/// Main error type for Strata domain operations.
///
/// This enum covers the error conditions that can occur when working
/// with documents and field values. Each variant includes context
/// information to help diagnose the issue.
#[derive(Debug, Error)]
pub enum StrataError {
    /// Collection name is invalid or empty.
    #[error("Invalid collection name '{name}': {reason}")]
    InvalidCollection {
        /// The invalid name provided
        name: String,
        /// Why it's invalid
        reason: String,
    },

    /// Record identifier is invalid.
    #[error("Invalid record id '{id}': {reason}")]
    InvalidRecordId {
        /// The invalid id
        id: String,
        /// Why it's invalid
        reason: String,
    },

    /// A required field was not found in a document.
    #[error("Field '{key}' not found in document")]
    FieldNotFound {
        /// The field path that was requested
        key: String,
    },

    /// Error parsing document content.
    #[error("Failed to parse document from '{source_name}': {message}")]
    ParseError {
        /// Source of the document (filename, payload, etc.)
        source_name: String,
        /// Description of the parse error
        message: String,
    },

    /// Validation error for field values.
    #[error("Validation error for field '{field}': {message}")]
    ValidationError {
        /// Field that failed validation
        field: String,
        /// Description of the validation failure
        message: String,
    },

    /// Generic internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl StrataError {
    /// Creates an InvalidCollection error.
    pub fn invalid_collection(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidCollection {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Creates an InvalidRecordId error.
    pub fn invalid_record_id(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRecordId {
            id: id.into(),
            reason: reason.into(),
        }
    }

    /// Creates a FieldNotFound error.
    pub fn field_not_found(key: impl Into<String>) -> Self {
        Self::FieldNotFound { key: key.into() }
    }

    /// Creates a ParseError.
    pub fn parse_error(source: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ParseError {
            source_name: source.into(),
            message: message.into(),
        }
    }

    /// Creates a ValidationError.
    pub fn validation_error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates an Internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Returns true if this is a validation error.
    pub fn is_validation_error(&self) -> bool {
        matches!(self, Self::ValidationError { .. })
    }

    /// Returns true if this is a parse error.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::ParseError { .. })
    }
}

/// Type alias for Results with StrataError.
///
/// Use this type for all domain operations that can fail.
pub type Result<T> = std::result::Result<T, StrataError>;
