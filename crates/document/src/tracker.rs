//! ChangeTracker: the dirty-tracking component embedded in a document
//!
//! The tracker owns the document's [`SnapshotStore`] and is the only thing
//! that writes to it. Accessors call [`ChangeTracker::record_read`] and
//! [`ChangeTracker::record_write`]; queries take the document's attributes
//! as an [`AttributeReader`].
//!
//! State per field, per cycle: CLEAN (no snapshot) → TRACKED on a container
//! read or any write → CLEAN again on [`ChangeTracker::clear_dirtiness`].

use crate::attributes::AttributeReader;
use crate::detector;
use crate::diff::{self, ChangeSet, FieldChange};
use crate::schema::FieldDescriptor;
use crate::snapshot::SnapshotStore;
use fieldtrack_core::{FieldName, Value};
use std::collections::BTreeSet;
use tracing::debug;

/// Snapshot store plus the capture and diff rules over it
#[derive(Debug, Clone, Default)]
pub struct ChangeTracker {
    store: SnapshotStore,
}

impl ChangeTracker {
    /// Create a tracker in the clean state
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply the read-time rule to a value just read
    pub fn record_read(&mut self, descriptor: &FieldDescriptor, current: Option<&Value>) -> bool {
        detector::after_read(&mut self.store, descriptor, current)
    }

    /// Apply the write-time rule before `prior` is overwritten
    pub fn record_write(&mut self, descriptor: &FieldDescriptor, prior: Option<&Value>) -> bool {
        detector::before_write(&mut self.store, descriptor, prior)
    }

    /// Whether `field` has a snapshot in this cycle
    pub fn is_tracking(&self, field: &str) -> bool {
        self.store.has(field)
    }

    /// Read-only view of the snapshots
    pub fn snapshots(&self) -> &SnapshotStore {
        &self.store
    }

    /// Whether any field differs from its snapshot
    pub fn is_changed<R: AttributeReader + ?Sized>(&self, reader: &R) -> bool {
        diff::is_changed(&self.store, reader)
    }

    /// Names of changed fields
    pub fn changed<R: AttributeReader + ?Sized>(&self, reader: &R) -> BTreeSet<FieldName> {
        diff::changed(&self.store, reader)
    }

    /// Every changed field with its prior and current value
    pub fn changes<R: AttributeReader + ?Sized>(&self, reader: &R) -> ChangeSet {
        diff::changes(&self.store, reader)
    }

    /// Change of one field, if it changed
    pub fn field_change<R: AttributeReader + ?Sized>(
        &self,
        reader: &R,
        field: &str,
    ) -> Option<FieldChange> {
        diff::field_change(&self.store, reader, field)
    }

    /// Value of `field` at the start of the cycle
    pub fn field_was<R: AttributeReader + ?Sized>(&self, reader: &R, field: &str) -> Option<Value> {
        diff::field_was(&self.store, reader, field)
    }

    /// End the dirty cycle: every field becomes CLEAN
    pub fn clear_dirtiness(&mut self) {
        if !self.store.is_empty() {
            debug!(tracked = self.store.len(), "cleared dirtiness");
        }
        self.store.clear();
    }
}
