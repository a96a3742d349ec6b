//! Raw attribute storage
//!
//! `Attributes` is the untracked name → value store behind a document. The
//! tracking layer treats it as a black box reached through
//! [`AttributeReader::read_attribute`] and plain writes; nothing in here
//! knows about snapshots.

use fieldtrack_core::{FieldName, Value};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Read access to current attribute values
///
/// A missing attribute (`None`) is "undefined", distinct from `Value::Null`.
pub trait AttributeReader {
    /// Current value of `field`, without any tracking side effects
    fn read_attribute(&self, field: &str) -> Option<&Value>;
}

/// Untracked attribute values of one document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes {
    values: BTreeMap<FieldName, Value>,
}

impl Attributes {
    /// Create an empty attribute set
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of `field`
    pub fn read(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    /// Mutable handle to the value of `field`
    pub fn read_mut(&mut self, field: &str) -> Option<&mut Value> {
        self.values.get_mut(field)
    }

    /// Store `value`, returning the previous one
    pub fn write(&mut self, field: FieldName, value: Value) -> Option<Value> {
        self.values.insert(field, value)
    }

    /// Make `field` undefined again, returning what it held
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.values.remove(field)
    }

    /// Whether `field` is defined
    pub fn contains(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }

    /// Number of defined attributes
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when no attribute is defined
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate defined attributes in name order
    pub fn iter(&self) -> impl Iterator<Item = (&FieldName, &Value)> {
        self.values.iter()
    }
}

impl AttributeReader for Attributes {
    fn read_attribute(&self, field: &str) -> Option<&Value> {
        self.read(field)
    }
}

impl FromIterator<(FieldName, Value)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (FieldName, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Attributes {
    type Item = (FieldName, Value);
    type IntoIter = std::collections::btree_map::IntoIter<FieldName, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}
