//! Per-document snapshot storage
//!
//! A `SnapshotStore` is a sparse map from field name to the value that field
//! held before it might have changed. Absence of an entry means the field is
//! definitely unchanged since the last clear; presence only means it *may*
//! have changed, and callers must compare against the live value.
//!
//! ## Rules
//!
//! - Entries are first-write-wins within a dirty cycle: `insert` never
//!   overwrites an existing entry.
//! - The store only grows until `clear`, which empties it entirely.
//! - The backing map is allocated on first insert, so documents that are
//!   only ever read through value-typed fields never allocate one.
//!
//! A snapshot is an `Option<Value>`: `None` records that the attribute was
//! undefined (never assigned), which is distinct from holding `Value::Null`.

use fieldtrack_core::{FieldName, Value};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// Sparse field-name → prior-value map owned by one document
#[derive(Debug, Clone, Default)]
pub struct SnapshotStore {
    entries: Option<BTreeMap<FieldName, Option<Value>>>,
}

impl SnapshotStore {
    /// Create an empty store without allocating
    pub fn new() -> Self {
        Self { entries: None }
    }

    /// Whether a snapshot exists for `field`
    pub fn has(&self, field: &str) -> bool {
        self.entries
            .as_ref()
            .is_some_and(|entries| entries.contains_key(field))
    }

    /// Snapshot recorded for `field`, if any
    ///
    /// The outer `Option` is entry presence; the inner one distinguishes an
    /// undefined attribute from a defined value.
    pub fn get(&self, field: &str) -> Option<Option<&Value>> {
        self.entries
            .as_ref()
            .and_then(|entries| entries.get(field))
            .map(Option::as_ref)
    }

    /// Record `value` for `field` unless an entry already exists.
    ///
    /// Returns `true` when the snapshot was stored.
    pub fn insert(&mut self, field: FieldName, value: Option<Value>) -> bool {
        match self.entries.get_or_insert_with(BTreeMap::new).entry(field) {
            Entry::Vacant(slot) => {
                slot.insert(value);
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    /// Drop every entry. Safe to call on an empty store.
    pub fn clear(&mut self) {
        if let Some(entries) = self.entries.as_mut() {
            entries.clear();
        }
    }

    /// Number of fields with a snapshot
    pub fn len(&self) -> usize {
        self.entries.as_ref().map_or(0, BTreeMap::len)
    }

    /// True when no field has a snapshot
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the backing map has been allocated yet
    pub fn is_allocated(&self) -> bool {
        self.entries.is_some()
    }

    /// Iterate snapshots in field-name order
    pub fn iter(&self) -> impl Iterator<Item = (&FieldName, Option<&Value>)> {
        self.entries
            .iter()
            .flat_map(|entries| entries.iter())
            .map(|(field, value)| (field, value.as_ref()))
    }
}
