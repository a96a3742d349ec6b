//! Tracked document
//!
//! A `Document` composes three parts:
//! - the shared [`Schema`] describing its fields
//! - raw [`Attributes`] holding current values
//! - a [`ChangeTracker`] owning the snapshots of this instance only
//!
//! Every field access goes through one of the wrapped accessors below,
//! which consult the field's descriptor and route through the tracker
//! before touching the raw attributes.
//!
//! ## Accessors
//!
//! | Accessor            | Capture rule                              |
//! |---------------------|-------------------------------------------|
//! | `get`               | container fields only, after the read     |
//! | `get_mut`           | every field, before the handle is handed out |
//! | `set` / `unset`     | every field, before the write              |
//! | `read_attribute`    | none (raw)                                 |
//!
//! ## Lifecycle
//!
//! Dirtiness is cleared after a create or update *succeeds*, and before a
//! pristine bulk assignment. A failed save leaves the change set intact.
//!
//! ## Thread Safety
//!
//! A document is `Send` but holds no locks. Share one across threads behind
//! an external lock, one lock per document.

use crate::attributes::{AttributeReader, Attributes};
use crate::config::UnknownFields;
use crate::diff::{ChangeSet, FieldChange};
use crate::persist::Persister;
use crate::schema::Schema;
use crate::tracker::ChangeTracker;
use fieldtrack_core::{DocumentId, Error, FieldName, Result, Value};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Options for [`Document::assign_attributes`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssignOptions {
    /// Treat the assigned values as the new baseline instead of as changes
    pub pristine: bool,
}

impl AssignOptions {
    /// Options for a pristine assignment
    pub fn pristine() -> Self {
        Self { pristine: true }
    }
}

/// In-memory document with per-field dirty tracking
#[derive(Debug, Clone)]
pub struct Document {
    id: DocumentId,
    schema: Arc<Schema>,
    attributes: Attributes,
    tracker: ChangeTracker,
    persisted: bool,
}

impl Document {
    /// Create a new, unsaved document.
    ///
    /// Declared defaults are assigned through the setter, so a fresh document
    /// reports them as changes from undefined until it is created.
    pub fn new(schema: Arc<Schema>) -> Self {
        let mut doc = Self::blank(schema, DocumentId::new(), false);
        let schema = Arc::clone(&doc.schema);
        for descriptor in schema.fields() {
            if let Some(default) = descriptor.default_value() {
                doc.tracker
                    .record_write(descriptor, doc.attributes.read(descriptor.name().as_str()));
                doc.attributes
                    .write(descriptor.name().clone(), default.deep_copy());
            }
        }
        doc
    }

    /// Rebuild a document loaded from storage. Nothing is dirty afterwards.
    ///
    /// Declared defaults fill in fields missing from `attributes`.
    ///
    /// # Errors
    ///
    /// Same as a pristine [`Document::assign_attributes`].
    pub fn from_persisted(
        schema: Arc<Schema>,
        id: DocumentId,
        attributes: Attributes,
    ) -> Result<Self> {
        let mut doc = Self::blank(schema, id, true);
        for descriptor in doc.schema.fields() {
            if let Some(default) = descriptor.default_value() {
                doc.attributes
                    .write(descriptor.name().clone(), default.deep_copy());
            }
        }
        doc.assign_attributes(attributes, AssignOptions::pristine())?;
        Ok(doc)
    }

    fn blank(schema: Arc<Schema>, id: DocumentId, persisted: bool) -> Self {
        Self {
            id,
            schema,
            attributes: Attributes::new(),
            tracker: ChangeTracker::new(),
            persisted,
        }
    }

    /// Document identity
    pub fn id(&self) -> DocumentId {
        self.id
    }

    /// Shared schema
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Raw attributes, untracked
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Dirty-tracking component
    pub fn tracker(&self) -> &ChangeTracker {
        &self.tracker
    }

    /// True until the first successful create
    pub fn is_new_record(&self) -> bool {
        !self.persisted
    }

    /// True once created or loaded from storage
    pub fn is_persisted(&self) -> bool {
        self.persisted
    }

    // =========================================================================
    // Wrapped accessors
    // =========================================================================

    /// Read `field`, snapshotting it first if it is a container.
    ///
    /// # Errors
    ///
    /// Returns `UnknownField` if `field` is not declared.
    pub fn get(&mut self, field: impl AsRef<str>) -> Result<Option<&Value>> {
        let field = field.as_ref();
        let descriptor = self.schema.require(field)?;
        self.tracker
            .record_read(descriptor, self.attributes.read(field));
        Ok(self.attributes.read(field))
    }

    /// Mutable handle to `field`.
    ///
    /// A mutable handle can change any field without going through the
    /// setter, so the snapshot is taken regardless of the field's kind.
    ///
    /// # Errors
    ///
    /// Returns `UnknownField` if `field` is not declared.
    pub fn get_mut(&mut self, field: impl AsRef<str>) -> Result<Option<&mut Value>> {
        let field = field.as_ref();
        let descriptor = self.schema.require(field)?;
        self.tracker
            .record_write(descriptor, self.attributes.read(field));
        Ok(self.attributes.read_mut(field))
    }

    /// Assign `value` to `field`, snapshotting the prior value first.
    ///
    /// # Errors
    ///
    /// Returns `UnknownField` if `field` is not declared.
    pub fn set(&mut self, field: impl AsRef<str>, value: impl Into<Value>) -> Result<()> {
        let field = field.as_ref();
        let descriptor = self.schema.require(field)?;
        self.tracker
            .record_write(descriptor, self.attributes.read(field));
        self.attributes
            .write(descriptor.name().clone(), value.into());
        Ok(())
    }

    /// Make `field` undefined, returning what it held.
    ///
    /// # Errors
    ///
    /// Returns `UnknownField` if `field` is not declared.
    pub fn unset(&mut self, field: impl AsRef<str>) -> Result<Option<Value>> {
        let field = field.as_ref();
        let descriptor = self.schema.require(field)?;
        self.tracker
            .record_write(descriptor, self.attributes.read(field));
        Ok(self.attributes.remove(field))
    }

    /// Current value of `field` without any tracking.
    pub fn read_attribute(&self, field: impl AsRef<str>) -> Option<&Value> {
        self.attributes.read(field.as_ref())
    }

    /// Assign many attributes at once.
    ///
    /// Keys are checked against the schema before anything is written. With
    /// [`AssignOptions::pristine`] dirtiness is cleared first and the values
    /// are written raw, so they become the new baseline; otherwise each goes
    /// through [`Document::set`].
    ///
    /// # Errors
    ///
    /// Returns `UnknownField` for an undeclared key when the schema's config
    /// rejects unknown fields. The document is left untouched.
    pub fn assign_attributes<I, K, V>(&mut self, attributes: I, options: AssignOptions) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let schema = Arc::clone(&self.schema);
        let mut accepted = Vec::new();
        for (key, value) in attributes {
            let key = key.as_ref();
            match schema.descriptor(key) {
                Some(descriptor) => accepted.push((descriptor, value.into())),
                None => match schema.config().unknown_fields {
                    UnknownFields::Reject => return Err(Error::unknown_field(key)),
                    UnknownFields::Ignore => {
                        warn!(schema = schema.name(), field = key, "ignoring undeclared field");
                    }
                },
            }
        }

        if options.pristine {
            self.clear_dirtiness();
            for (descriptor, value) in accepted {
                self.attributes.write(descriptor.name().clone(), value);
            }
        } else {
            for (descriptor, value) in accepted {
                self.tracker
                    .record_write(descriptor, self.attributes.read(descriptor.name().as_str()));
                self.attributes.write(descriptor.name().clone(), value);
            }
        }
        Ok(())
    }

    // =========================================================================
    // Change queries
    // =========================================================================

    /// Whether any field changed this cycle
    pub fn is_changed(&self) -> bool {
        self.tracker.is_changed(&self.attributes)
    }

    /// Names of changed fields
    pub fn changed(&self) -> BTreeSet<FieldName> {
        self.tracker.changed(&self.attributes)
    }

    /// Every changed field with its prior and current value
    pub fn changes(&self) -> ChangeSet {
        self.tracker.changes(&self.attributes)
    }

    /// `(old, new)` for `field` if it changed
    pub fn field_change(&self, field: impl AsRef<str>) -> Option<FieldChange> {
        self.tracker.field_change(&self.attributes, field.as_ref())
    }

    /// Whether `field` changed
    pub fn is_field_changed(&self, field: impl AsRef<str>) -> bool {
        self.field_change(field).is_some()
    }

    /// Value of `field` at the start of the cycle
    pub fn field_was(&self, field: impl AsRef<str>) -> Option<Value> {
        self.tracker.field_was(&self.attributes, field.as_ref())
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Start a new dirty cycle
    pub fn clear_dirtiness(&mut self) {
        self.tracker.clear_dirtiness();
    }

    /// Hook for a committed create
    pub fn after_create(&mut self) {
        self.persisted = true;
        self.clear_dirtiness();
    }

    /// Hook for a committed update
    pub fn after_update(&mut self) {
        self.clear_dirtiness();
    }

    /// Write the document through `persister`.
    ///
    /// New records are created with all attributes; persisted ones send only
    /// their change set, and skip the write when nothing changed. The
    /// matching hook runs only after the persister succeeds.
    ///
    /// # Errors
    ///
    /// Propagates the persister's error with dirty state unchanged.
    pub fn save<P: Persister + ?Sized>(&mut self, persister: &mut P) -> Result<()> {
        if self.is_new_record() {
            if let Err(e) = persister.create(self.id, &self.attributes) {
                error!(id = %self.id, schema = self.schema.name(), error = %e, "create failed");
                return Err(e);
            }
            info!(id = %self.id, schema = self.schema.name(), "document created");
            self.after_create();
        } else {
            let changes = self.changes();
            if !changes.is_empty() {
                if let Err(e) = persister.update(self.id, &changes, &self.attributes) {
                    error!(id = %self.id, schema = self.schema.name(), error = %e, "update failed");
                    return Err(e);
                }
                info!(
                    id = %self.id,
                    schema = self.schema.name(),
                    fields = changes.len(),
                    "document updated"
                );
            }
            self.after_update();
        }
        Ok(())
    }
}

impl AttributeReader for Document {
    fn read_attribute(&self, field: &str) -> Option<&Value> {
        self.attributes.read(field)
    }
}
