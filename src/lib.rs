//! fieldtrack - Per-field dirty tracking for in-memory documents
//!
//! A document records, per field, the value it held before it might have
//! changed. At save time the persistence layer asks for the change set and
//! gets exactly the fields that differ, with their prior values.
//!
//! # Quick Start
//!
//! ```
//! use fieldtrack::{Document, FieldType, MemoryPersister, Schema, Value};
//! use std::sync::Arc;
//!
//! let schema = Arc::new(
//!     Schema::builder("Article")
//!         .field("title", FieldType::String)
//!         .field("tags", FieldType::Array)
//!         .build()?,
//! );
//! let mut persister = MemoryPersister::new();
//!
//! let mut doc = Document::new(Arc::clone(&schema));
//! doc.set("title", "draft")?;
//! doc.set("tags", Value::Array(vec![]))?;
//! doc.save(&mut persister)?;
//! assert!(!doc.is_changed());
//!
//! // mutate a container in place, without the setter
//! if let Some(tags) = doc.get_mut("tags")?.and_then(Value::as_array_mut) {
//!     tags.push("rust".into());
//! }
//! assert_eq!(doc.changed().len(), 1);
//! # Ok::<(), fieldtrack::Error>(())
//! ```
//!
//! # Architecture
//!
//! - `fieldtrack-core`: values, field names and types, errors
//! - `fieldtrack-document`: snapshots, capture policy, diffs, documents

pub use fieldtrack_core::*;
pub use fieldtrack_document::*;
