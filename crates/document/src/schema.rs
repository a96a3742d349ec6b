//! Field registry for tracked documents
//!
//! A `Schema` is built once per document type and shared by every instance
//! through an `Arc`. Each declared field becomes a [`FieldDescriptor`]; the
//! generic accessor routines in [`Document`](crate::Document) look the
//! descriptor up by name instead of generating a method per field at runtime.
//!
//! The read-time capture rule is decided here, at registration, from the
//! declared type. It is never inferred from the value seen at access time.

use crate::config::TrackingConfig;
use fieldtrack_core::{Error, FieldKind, FieldName, FieldType, Result, Value};
use std::collections::HashMap;

/// Accessor descriptor for one declared field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    name: FieldName,
    field_type: FieldType,
    kind: FieldKind,
    default: Option<Value>,
}

impl FieldDescriptor {
    /// Canonical field name
    pub fn name(&self) -> &FieldName {
        &self.name
    }

    /// Declared type
    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// Classification fixed at registration
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Value assigned to new documents, if declared
    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Whether a plain read must snapshot the field
    pub fn captures_on_read(&self) -> bool {
        self.kind == FieldKind::Container
    }
}

/// Declared fields of one document type
#[derive(Debug, Clone)]
pub struct Schema {
    name: String,
    fields: Vec<FieldDescriptor>,
    index: HashMap<FieldName, usize>,
    config: TrackingConfig,
}

impl Schema {
    /// Start declaring a schema
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder::new(name)
    }

    /// Document type name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Descriptor for `field`, if declared
    pub fn descriptor(&self, field: &str) -> Option<&FieldDescriptor> {
        self.index.get(field).map(|&i| &self.fields[i])
    }

    /// Descriptor for `field`, or `UnknownField`
    pub fn require(&self, field: &str) -> Result<&FieldDescriptor> {
        self.descriptor(field)
            .ok_or_else(|| Error::unknown_field(field))
    }

    /// Whether `field` is declared
    pub fn contains(&self, field: &str) -> bool {
        self.index.contains_key(field)
    }

    /// Declared fields in declaration order
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Tracking configuration
    pub fn config(&self) -> &TrackingConfig {
        &self.config
    }
}

/// Builder for [`Schema`]
///
/// Declaration errors are deferred to [`SchemaBuilder::build`] so the
/// builder can be chained.
#[derive(Debug)]
pub struct SchemaBuilder {
    name: String,
    declarations: Vec<(String, FieldType, Option<Value>)>,
    config: TrackingConfig,
}

impl SchemaBuilder {
    /// Create a builder for a document type named `name`
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declarations: Vec::new(),
            config: TrackingConfig::default(),
        }
    }

    /// Use `config` for documents of this schema
    pub fn config(mut self, config: TrackingConfig) -> Self {
        self.config = config;
        self
    }

    /// Declare a field with no default
    pub fn field(mut self, name: impl Into<String>, field_type: FieldType) -> Self {
        self.declarations.push((name.into(), field_type, None));
        self
    }

    /// Declare a field assigned `default` on new documents
    pub fn field_with_default(
        mut self,
        name: impl Into<String>,
        field_type: FieldType,
        default: impl Into<Value>,
    ) -> Self {
        self.declarations
            .push((name.into(), field_type, Some(default.into())));
        self
    }

    /// Validate declarations and produce the schema
    ///
    /// # Errors
    ///
    /// - `InvalidFieldName` if a name is not an identifier
    /// - `DuplicateField` if a name is declared twice
    pub fn build(self) -> Result<Schema> {
        let mut fields = Vec::with_capacity(self.declarations.len());
        let mut index = HashMap::with_capacity(self.declarations.len());

        for (raw, field_type, default) in self.declarations {
            let name = FieldName::new(raw)?;
            if index.contains_key(&name) {
                return Err(Error::DuplicateField {
                    field: name.into(),
                });
            }

            let kind = match field_type {
                FieldType::String if self.config.strings_as_containers => FieldKind::Container,
                other => other.kind(),
            };

            index.insert(name.clone(), fields.len());
            fields.push(FieldDescriptor {
                name,
                field_type,
                kind,
                default,
            });
        }

        Ok(Schema {
            name: self.name,
            fields,
            index,
            config: self.config,
        })
    }
}
