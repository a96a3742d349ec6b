//! Field naming and classification
//!
//! A document declares its fields once, at schema-definition time. Each
//! declaration carries:
//! - **FieldName**: the canonical key used everywhere a field is looked up
//! - **FieldType**: the declared type of the values the field holds
//! - **FieldKind**: whether values of that type can change in place
//!
//! ## Canonical Keys
//!
//! Lookups must not depend on how the caller spells the key (`&str`,
//! `String`, `&FieldName`). `FieldName` implements `Borrow<str>`, so any map
//! keyed by `FieldName` can be queried with a plain string, and only the one
//! canonical form is ever stored.
//!
//! ## Validation
//!
//! Field names must:
//! - Be 1-128 characters
//! - Contain only ASCII alphanumerics and underscore
//! - Not start with a digit

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Maximum length of a field name
pub const MAX_FIELD_NAME_LENGTH: usize = 128;

/// Canonical name of a declared field
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FieldName(String);

/// Error when validating a field name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldNameError {
    /// Name is empty
    Empty,
    /// Name exceeds maximum length
    TooLong {
        /// Actual length of the name
        length: usize,
        /// Maximum allowed length
        max: usize,
    },
    /// Name contains invalid character
    InvalidChar {
        /// The invalid character
        char: char,
        /// Position of the invalid character
        position: usize,
    },
    /// Name starts with a digit
    InvalidStart {
        /// The invalid starting character
        char: char,
    },
}

impl fmt::Display for FieldNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldNameError::Empty => write!(f, "field name cannot be empty"),
            FieldNameError::TooLong { length, max } => {
                write!(f, "field name too long: {} chars (max {})", length, max)
            }
            FieldNameError::InvalidChar { char, position } => write!(
                f,
                "invalid character '{}' at position {} (only alphanumeric and underscore allowed)",
                char, position
            ),
            FieldNameError::InvalidStart { char } => {
                write!(f, "field name cannot start with '{}'", char)
            }
        }
    }
}

impl std::error::Error for FieldNameError {}

impl FieldName {
    /// Create a new FieldName, validating the input
    ///
    /// # Errors
    ///
    /// Returns `FieldNameError` if the name is not a valid identifier.
    pub fn new(name: impl Into<String>) -> Result<Self, FieldNameError> {
        let name = name.into();
        Self::validate(&name)?;
        Ok(FieldName(name))
    }

    /// Validate a field name
    pub fn validate(name: &str) -> Result<(), FieldNameError> {
        let first = name.chars().next().ok_or(FieldNameError::Empty)?;

        if name.len() > MAX_FIELD_NAME_LENGTH {
            return Err(FieldNameError::TooLong {
                length: name.len(),
                max: MAX_FIELD_NAME_LENGTH,
            });
        }

        if first.is_ascii_digit() {
            return Err(FieldNameError::InvalidStart { char: first });
        }

        for (position, c) in name.chars().enumerate() {
            if !c.is_ascii_alphanumeric() && c != '_' {
                return Err(FieldNameError::InvalidChar { char: c, position });
            }
        }

        Ok(())
    }

    /// Get the name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for FieldName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for FieldName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for FieldName {
    type Error = FieldNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        FieldName::new(value)
    }
}

impl TryFrom<&str> for FieldName {
    type Error = FieldNameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        FieldName::new(value)
    }
}

impl From<FieldName> for String {
    fn from(name: FieldName) -> Self {
        name.0
    }
}

impl PartialEq<str> for FieldName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for FieldName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Whether values of a field can be mutated in place after a read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    /// Immutable once read; only a setter can change it
    Value,
    /// Sequence, mapping or buffer; a reader may mutate it in place
    Container,
}

/// Declared type of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    /// Boolean
    Bool,
    /// 64-bit integer
    Int,
    /// 64-bit float
    Float,
    /// Fixed text, replaced wholesale through the setter
    String,
    /// Mutable text buffer
    Text,
    /// Mutable byte buffer
    Bytes,
    /// Sequence of values
    Array,
    /// Mapping of string keys to values
    Object,
    /// Untyped; may hold anything
    Any,
}

impl FieldType {
    /// Static classification used at registration time
    pub fn kind(self) -> FieldKind {
        match self {
            FieldType::Bool | FieldType::Int | FieldType::Float | FieldType::String => {
                FieldKind::Value
            }
            FieldType::Text
            | FieldType::Bytes
            | FieldType::Array
            | FieldType::Object
            | FieldType::Any => FieldKind::Container,
        }
    }

    /// Get the type name as a string
    pub fn name(self) -> &'static str {
        match self {
            FieldType::Bool => "Bool",
            FieldType::Int => "Int",
            FieldType::Float => "Float",
            FieldType::String => "String",
            FieldType::Text => "Text",
            FieldType::Bytes => "Bytes",
            FieldType::Array => "Array",
            FieldType::Object => "Object",
            FieldType::Any => "Any",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
