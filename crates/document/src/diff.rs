//! Change-set computation
//!
//! Diffing walks the snapshot store only. A field without a snapshot is
//! unchanged by definition; a field with one is changed only if the snapshot
//! differs from the current value by value equality. None of these functions
//! mutate the store.

use crate::attributes::AttributeReader;
use crate::snapshot::SnapshotStore;
use fieldtrack_core::{FieldName, Value};
use serde::{Deserialize, Serialize};
use std::collections::btree_map;
use std::collections::{BTreeMap, BTreeSet};
use tracing::trace;

/// Prior and current value of one changed field
///
/// `None` on either side means the attribute was (or is) undefined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldChange {
    /// Value captured at the start of the dirty cycle
    pub old: Option<Value>,
    /// Value now
    pub new: Option<Value>,
}

impl FieldChange {
    /// Build a change record
    pub fn new(old: Option<Value>, new: Option<Value>) -> Self {
        Self { old, new }
    }
}

/// Every changed field of a document, keyed by canonical name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChangeSet {
    changes: BTreeMap<FieldName, FieldChange>,
}

impl ChangeSet {
    /// Change for `field`, if it changed
    pub fn get(&self, field: &str) -> Option<&FieldChange> {
        self.changes.get(field)
    }

    /// Whether `field` changed
    pub fn contains(&self, field: &str) -> bool {
        self.changes.contains_key(field)
    }

    /// Number of changed fields
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// True when nothing changed
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Names of changed fields
    pub fn fields(&self) -> BTreeSet<FieldName> {
        self.changes.keys().cloned().collect()
    }

    /// Iterate changes in field-name order
    pub fn iter(&self) -> btree_map::Iter<'_, FieldName, FieldChange> {
        self.changes.iter()
    }
}

impl IntoIterator for ChangeSet {
    type Item = (FieldName, FieldChange);
    type IntoIter = btree_map::IntoIter<FieldName, FieldChange>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.into_iter()
    }
}

impl<'a> IntoIterator for &'a ChangeSet {
    type Item = (&'a FieldName, &'a FieldChange);
    type IntoIter = btree_map::Iter<'a, FieldName, FieldChange>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.iter()
    }
}

/// All fields whose snapshot differs from the current value
pub fn changes<R: AttributeReader + ?Sized>(store: &SnapshotStore, reader: &R) -> ChangeSet {
    let changes: BTreeMap<FieldName, FieldChange> = store
        .iter()
        .filter_map(|(field, old)| {
            let current = reader.read_attribute(field.as_str());
            (old != current).then(|| {
                (
                    field.clone(),
                    FieldChange::new(old.cloned(), current.cloned()),
                )
            })
        })
        .collect();
    trace!(
        tracked = store.len(),
        changed = changes.len(),
        "computed change set"
    );
    ChangeSet { changes }
}

/// Whether any tracked field differs, stopping at the first difference
pub fn is_changed<R: AttributeReader + ?Sized>(store: &SnapshotStore, reader: &R) -> bool {
    store
        .iter()
        .any(|(field, old)| old != reader.read_attribute(field.as_str()))
}

/// Names of changed fields
pub fn changed<R: AttributeReader + ?Sized>(store: &SnapshotStore, reader: &R) -> BTreeSet<FieldName> {
    changes(store, reader).fields()
}

/// Change of one field: present only if tracked *and* different
pub fn field_change<R: AttributeReader + ?Sized>(
    store: &SnapshotStore,
    reader: &R,
    field: &str,
) -> Option<FieldChange> {
    let old = store.get(field)?;
    let current = reader.read_attribute(field);
    (old != current).then(|| FieldChange::new(old.cloned(), current.cloned()))
}

/// Value of `field` at the start of the cycle: the snapshot if tracked,
/// otherwise the current value
pub fn field_was<R: AttributeReader + ?Sized>(
    store: &SnapshotStore,
    reader: &R,
    field: &str,
) -> Option<Value> {
    match store.get(field) {
        Some(old) => old.cloned(),
        None => reader.read_attribute(field).cloned(),
    }
}
