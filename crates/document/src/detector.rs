//! Snapshot capture policy
//!
//! One rule serves every call site: record a field's value exactly once per
//! dirty cycle, the first time it is at risk of changing.
//!
//! - **Write**: a setter (or a mutable handle) is proof the field is about to
//!   change, so the prior value is captured unconditionally.
//! - **Read**: only fields declared as containers are captured, since the
//!   caller may mutate what was returned. Value-typed fields can only change
//!   through a setter, which captures on its own.
//!
//! Read-time capture fires on every read of a container field, whether or not
//! the caller goes on to mutate it. Diffing filters out the false positives.

use crate::schema::FieldDescriptor;
use crate::snapshot::SnapshotStore;
use fieldtrack_core::{FieldName, Value};
use tracing::debug;

/// Capture a deep copy of `current` unless `field` already has a snapshot.
///
/// Returns `true` when a snapshot was taken.
pub fn attribute_may_change(
    store: &mut SnapshotStore,
    field: &FieldName,
    current: Option<&Value>,
) -> bool {
    if store.has(field.as_str()) {
        return false;
    }
    let captured = store.insert(field.clone(), current.map(Value::deep_copy));
    if captured {
        let prior = current.map_or("undefined", |v| v.type_name());
        debug!(field = %field, prior = prior, "captured snapshot");
    }
    captured
}

/// Write-time rule: called with the value *before* the write lands.
pub fn before_write(
    store: &mut SnapshotStore,
    descriptor: &FieldDescriptor,
    prior: Option<&Value>,
) -> bool {
    attribute_may_change(store, descriptor.name(), prior)
}

/// Read-time rule: called with the value just read.
pub fn after_read(
    store: &mut SnapshotStore,
    descriptor: &FieldDescriptor,
    current: Option<&Value>,
) -> bool {
    if !descriptor.captures_on_read() {
        return false;
    }
    attribute_may_change(store, descriptor.name(), current)
}
