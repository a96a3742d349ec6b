//! Error types for fieldtrack
//!
//! Dirty tracking itself never fails: capturing a snapshot and computing a
//! diff are pure operations. Errors come from the edges around it:
//! - resolving a field name against a schema
//! - loading configuration
//! - the persistence layer reporting a failed create or update
//!
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use crate::field::FieldNameError;
use crate::types::DocumentId;
use thiserror::Error;

/// Result type alias for fieldtrack operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for fieldtrack
#[derive(Debug, Error)]
pub enum Error {
    /// Field is not declared on the document's schema
    #[error("Unknown field: {field}")]
    UnknownField {
        /// Name as the caller spelled it
        field: String,
    },

    /// Field name failed validation
    #[error("Invalid field name: {0}")]
    InvalidFieldName(#[from] FieldNameError),

    /// Schema declares the same field twice
    #[error("Duplicate field: {field}")]
    DuplicateField {
        /// The repeated name
        field: String,
    },

    /// Configuration could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Persistence layer rejected a write
    #[error("Persistence error during {operation}: {message}")]
    Persistence {
        /// "create" or "update"
        operation: &'static str,
        /// Human-readable failure reason
        message: String,
    },

    /// No persisted document with this id
    #[error("Document not found: {id}")]
    NotFound {
        /// Requested id
        id: DocumentId,
    },
}

impl Error {
    /// Build an `UnknownField` error from any key representation
    pub fn unknown_field(field: impl AsRef<str>) -> Self {
        Error::UnknownField {
            field: field.as_ref().to_string(),
        }
    }
}
