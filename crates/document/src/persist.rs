//! Persistence boundary
//!
//! The tracking layer never decides how a document is written. It hands a
//! [`Persister`] either the full attribute set (create) or the change set
//! plus attributes (update), and fires its lifecycle hook only when the
//! persister reports success.

use crate::attributes::Attributes;
use crate::diff::ChangeSet;
use crate::document::Document;
use crate::schema::Schema;
use fieldtrack_core::{DocumentId, Error, Result};
use std::collections::HashMap;
use std::sync::Arc;

/// Sink for document writes
pub trait Persister {
    /// Write a new document
    fn create(&mut self, id: DocumentId, attributes: &Attributes) -> Result<()>;

    /// Write the changes of an existing document
    ///
    /// `attributes` is the full current state, for persisters that rewrite
    /// whole documents instead of applying field-level patches.
    fn update(&mut self, id: DocumentId, changes: &ChangeSet, attributes: &Attributes)
        -> Result<()>;
}

/// A write the [`MemoryPersister`] accepted
#[derive(Debug, Clone, PartialEq)]
pub enum WriteRecord {
    /// Full document created
    Create {
        /// Document written
        id: DocumentId,
    },
    /// Field-level patch applied
    Update {
        /// Document patched
        id: DocumentId,
        /// Patch as received
        changes: ChangeSet,
    },
}

/// HashMap-backed persister that applies updates as field-level patches
#[derive(Debug, Default)]
pub struct MemoryPersister {
    records: HashMap<DocumentId, Attributes>,
    log: Vec<WriteRecord>,
}

impl MemoryPersister {
    /// Create an empty persister
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored attributes of `id`
    pub fn get(&self, id: DocumentId) -> Option<&Attributes> {
        self.records.get(&id)
    }

    /// Number of stored documents
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when nothing is stored
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Every accepted write, oldest first
    pub fn log(&self) -> &[WriteRecord] {
        &self.log
    }

    /// Rebuild a clean document from the stored record
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if `id` was never created.
    pub fn load(&self, schema: Arc<Schema>, id: DocumentId) -> Result<Document> {
        let attributes = self.records.get(&id).ok_or(Error::NotFound { id })?;
        Document::from_persisted(schema, id, attributes.clone())
    }
}

impl Persister for MemoryPersister {
    fn create(&mut self, id: DocumentId, attributes: &Attributes) -> Result<()> {
        if self.records.contains_key(&id) {
            return Err(Error::Persistence {
                operation: "create",
                message: format!("document {} already exists", id),
            });
        }
        self.records.insert(id, attributes.clone());
        self.log.push(WriteRecord::Create { id });
        Ok(())
    }

    fn update(
        &mut self,
        id: DocumentId,
        changes: &ChangeSet,
        _attributes: &Attributes,
    ) -> Result<()> {
        let record = self.records.get_mut(&id).ok_or(Error::NotFound { id })?;
        for (field, change) in changes {
            match &change.new {
                Some(value) => {
                    record.write(field.clone(), value.clone());
                }
                None => {
                    record.remove(field.as_str());
                }
            }
        }
        self.log.push(WriteRecord::Update {
            id,
            changes: changes.clone(),
        });
        Ok(())
    }
}
