//! Core types for fieldtrack
//!
//! This crate defines the foundational types used by the tracking layer:
//! - Value: Unified value enum for document attributes
//! - FieldName / FieldType / FieldKind: Field declarations and classification
//! - DocumentId: Identity of a persisted document
//! - Error: Error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod field;
pub mod types;
pub mod value;

pub use error::{Error, Result};
pub use field::{FieldKind, FieldName, FieldNameError, FieldType, MAX_FIELD_NAME_LENGTH};
pub use types::DocumentId;
pub use value::Value;
