//! Per-field dirty tracking for in-memory documents
//!
//! This crate tells a persistence layer, at save time, exactly which
//! attributes of a document changed and what they were before:
//! - SnapshotStore: sparse map of values observed before they might change
//! - detector: when to take a snapshot (reads of containers, every write)
//! - diff: change sets and per-field queries over the snapshots
//! - ChangeTracker: the component a document embeds
//! - Schema: declared fields and their static capture classification
//! - Document: wrapped accessors, bulk assignment and lifecycle hooks
//! - Persister: the boundary a document saves through
//! - tracked_document!: typed per-field accessor generation

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod attributes;
pub mod config;
pub mod detector;
pub mod diff;
pub mod document;
pub mod persist;
pub mod schema;
pub mod snapshot;
pub mod tracker;
pub mod typed;

pub use attributes::{AttributeReader, Attributes};
pub use config::{TrackingConfig, UnknownFields, CONFIG_FILE_NAME};
pub use diff::{ChangeSet, FieldChange};
pub use document::{AssignOptions, Document};
pub use persist::{MemoryPersister, Persister, WriteRecord};
pub use schema::{FieldDescriptor, Schema, SchemaBuilder};
pub use snapshot::SnapshotStore;
pub use tracker::ChangeTracker;

#[doc(hidden)]
pub mod __private {
    pub use fieldtrack_core::{DocumentId, FieldType, Result, Value};
    pub use once_cell::sync::Lazy;
    pub use paste::paste;

    pub use crate::typed::field_key;
}
