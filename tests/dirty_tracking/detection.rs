//! What registers as a change, and what does not

use crate::common::*;
use fieldtrack::{FieldChange, FieldName, Value};
use std::collections::{BTreeSet, HashMap};

#[test]
fn cleared_document_reports_nothing() {
    let mut doc = loaded_article(&[("name", Value::from("a")), ("tags", array(&[1]))]);
    doc.set("name", "b").unwrap();
    doc.clear_dirtiness();

    assert!(!doc.is_changed());
    assert!(doc.changes().is_empty());
    assert!(doc.changed().is_empty());
}

#[test]
fn scalar_write_then_revert() {
    let mut doc = loaded_article(&[("views", Value::Int(10))]);

    doc.set("views", 11).unwrap();
    assert!(doc.is_field_changed("views"));
    assert_eq!(
        doc.field_change("views"),
        Some(FieldChange::new(Some(Value::Int(10)), Some(Value::Int(11))))
    );

    doc.set("views", 10).unwrap();
    assert!(!doc.is_field_changed("views"));
    assert!(doc.tracker().is_tracking("views"));
    assert!(!doc.is_changed());
}

#[test]
fn sequence_read_then_push() {
    let mut doc = loaded_article(&[("tags", array(&[1, 2]))]);

    doc.get("tags").unwrap();
    doc.get_mut("tags")
        .unwrap()
        .and_then(Value::as_array_mut)
        .unwrap()
        .push(Value::Int(3));

    assert!(doc.is_field_changed("tags"));
    assert_eq!(
        doc.field_change("tags"),
        Some(FieldChange::new(Some(array(&[1, 2])), Some(array(&[1, 2, 3]))))
    );
}

#[test]
fn mapping_mutation_detected() {
    let mut doc = loaded_article(&[("meta", Value::Object(HashMap::new()))]);

    doc.get_mut("meta")
        .unwrap()
        .and_then(Value::as_object_mut)
        .unwrap()
        .insert("lang".to_string(), Value::from("en"));

    let change = doc.field_change("meta").unwrap();
    assert_eq!(change.old, Some(Value::Object(HashMap::new())));
    assert_eq!(change.new.unwrap().len(), Some(1));
}

#[test]
fn text_buffer_mutation_detected() {
    let mut doc = loaded_article(&[("body", Value::from("hello"))]);

    doc.get_mut("body")
        .unwrap()
        .and_then(Value::as_string_mut)
        .unwrap()
        .push_str(", world");

    assert_eq!(doc.field_was("body"), Some(Value::from("hello")));
    assert_eq!(doc.read_attribute("body"), Some(&Value::from("hello, world")));
}

#[test]
fn integer_reads_never_snapshot() {
    let mut doc = loaded_article(&[("views", Value::Int(5))]);

    assert_eq!(doc.get("views").unwrap(), Some(&Value::Int(5)));
    assert_eq!(doc.get("views").unwrap(), Some(&Value::Int(5)));

    assert!(!doc.tracker().is_tracking("views"));
    assert!(doc.tracker().snapshots().is_empty());
    assert!(!doc.is_changed());
}

#[test]
fn container_reads_snapshot_even_without_mutation() {
    let mut doc = loaded_article(&[("tags", array(&[1]))]);
    doc.get("tags").unwrap();
    doc.get("tags").unwrap();

    assert_eq!(doc.tracker().snapshots().len(), 1);
    assert!(!doc.is_changed());
}

#[test]
fn first_write_wins_within_cycle() {
    let mut doc = loaded_article(&[("views", Value::Int(0))]);
    doc.set("views", 1).unwrap();
    doc.set("views", 2).unwrap();

    assert_eq!(
        doc.field_change("views"),
        Some(FieldChange::new(Some(Value::Int(0)), Some(Value::Int(2))))
    );
}

#[test]
fn read_capture_is_the_baseline_for_later_writes() {
    let mut doc = loaded_article(&[("tags", array(&[1]))]);
    doc.get("tags").unwrap();
    doc.get_mut("tags")
        .unwrap()
        .and_then(Value::as_array_mut)
        .unwrap()
        .push(Value::Int(2));
    doc.set("tags", array(&[9])).unwrap();

    assert_eq!(doc.field_was("tags"), Some(array(&[1])));
}

#[test]
fn key_spelling_does_not_matter() {
    let mut doc = loaded_article(&[("name", Value::from("a"))]);
    let owned = String::from("name");
    let canonical = FieldName::new("name").unwrap();

    doc.set(&owned, "b").unwrap();
    doc.set(&canonical, "c").unwrap();

    assert_eq!(doc.tracker().snapshots().len(), 1);
    assert_eq!(doc.field_was("name"), Some(Value::from("a")));
    assert_eq!(doc.field_change(&canonical), doc.field_change("name"));
    assert_eq!(doc.changed(), BTreeSet::from([canonical]));
}

#[test]
fn changes_cover_every_differing_field() {
    let mut doc = loaded_article(&[("name", Value::from("a")), ("views", Value::Int(1))]);
    doc.set("name", "b").unwrap();
    doc.set("views", 1).unwrap();
    doc.set("body", "new").unwrap();

    let changes = doc.changes();
    let fields: Vec<&str> = changes.iter().map(|(f, _)| f.as_str()).collect();
    assert_eq!(fields, vec!["body", "name"]);
    assert_eq!(changes.get("body").unwrap().old, None);
}

#[test]
fn queries_do_not_mutate_the_store() {
    let mut doc = loaded_article(&[("name", Value::from("a"))]);
    doc.set("name", "b").unwrap();
    let before = doc.tracker().snapshots().len();

    let _ = doc.changes();
    let _ = doc.changed();
    let _ = doc.is_changed();
    let _ = doc.field_change("views");
    let _ = doc.field_was("views");

    assert_eq!(doc.tracker().snapshots().len(), before);
    assert!(!doc.tracker().is_tracking("views"));
}
