//! Shared helpers for the dirty tracking suite

#![allow(dead_code)]

use fieldtrack::{
    Attributes, ChangeSet, Document, DocumentId, Error, FieldName, FieldType, Persister, Result,
    Schema, Value,
};
use std::sync::{Arc, Once};

static INIT_TRACING: Once = Once::new();

/// Install a test subscriber once so `RUST_LOG=debug` shows captures.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

/// Article schema used across the suite
pub fn article_schema() -> Arc<Schema> {
    Arc::new(
        Schema::builder("Article")
            .field("name", FieldType::String)
            .field_with_default("views", FieldType::Int, 0)
            .field("tags", FieldType::Array)
            .field("meta", FieldType::Object)
            .field("body", FieldType::Text)
            .build()
            .unwrap(),
    )
}

pub fn attrs(pairs: &[(&str, Value)]) -> Attributes {
    pairs
        .iter()
        .map(|(k, v)| (FieldName::new(*k).unwrap(), v.clone()))
        .collect()
}

pub fn array(items: &[i64]) -> Value {
    Value::Array(items.iter().copied().map(Value::Int).collect())
}

/// A loaded, clean article
pub fn loaded_article(pairs: &[(&str, Value)]) -> Document {
    init_tracing();
    Document::from_persisted(article_schema(), DocumentId::new(), attrs(pairs)).unwrap()
}

/// Persister that fails every write
#[derive(Default)]
pub struct FailingPersister {
    pub attempts: usize,
}

impl Persister for FailingPersister {
    fn create(&mut self, _id: DocumentId, _attributes: &Attributes) -> Result<()> {
        self.attempts += 1;
        Err(Error::Persistence {
            operation: "create",
            message: "disk full".to_string(),
        })
    }

    fn update(&mut self, _id: DocumentId, _changes: &ChangeSet, _attributes: &Attributes) -> Result<()> {
        self.attempts += 1;
        Err(Error::Persistence {
            operation: "update",
            message: "disk full".to_string(),
        })
    }
}
