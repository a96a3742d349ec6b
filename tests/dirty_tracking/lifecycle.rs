//! Lifecycle hooks: create, update, pristine assignment, failed saves

use crate::common::*;
use fieldtrack::{
    AssignOptions, Document, FieldChange, MemoryPersister, Value, WriteRecord,
};

#[test]
fn create_commit_clears() {
    init_tracing();
    let mut persister = MemoryPersister::new();
    let mut doc = Document::new(article_schema());
    doc.set("name", "first").unwrap();

    assert!(doc.is_changed());
    assert!(doc.is_field_changed("name"));

    doc.save(&mut persister).unwrap();

    assert!(!doc.is_changed());
    assert!(doc.is_persisted());
    assert_eq!(persister.log(), &[WriteRecord::Create { id: doc.id() }]);
    assert_eq!(persister.get(doc.id()), Some(doc.attributes()));
}

#[test]
fn update_commit_clears_and_ships_only_changes() {
    let mut persister = MemoryPersister::new();
    let mut doc = Document::new(article_schema());
    doc.set("name", "first").unwrap();
    doc.set("tags", array(&[1])).unwrap();
    doc.save(&mut persister).unwrap();

    doc.set("name", "second").unwrap();
    doc.get("tags").unwrap();
    let expected = doc.changes();
    assert_eq!(expected.len(), 1);

    doc.save(&mut persister).unwrap();

    assert!(!doc.is_changed());
    assert_eq!(
        persister.log().last(),
        Some(&WriteRecord::Update {
            id: doc.id(),
            changes: expected
        })
    );
    let reloaded = persister.load(article_schema(), doc.id()).unwrap();
    assert_eq!(reloaded.read_attribute("name"), Some(&Value::from("second")));
    assert!(!reloaded.is_changed());
}

#[test]
fn clean_update_skips_the_write() {
    let mut persister = MemoryPersister::new();
    let mut doc = Document::new(article_schema());
    doc.save(&mut persister).unwrap();

    doc.get("tags").unwrap();
    doc.save(&mut persister).unwrap();

    assert_eq!(persister.log().len(), 1);
    assert!(doc.tracker().snapshots().is_empty());
}

#[test]
fn failed_create_keeps_dirty_state() {
    let mut persister = FailingPersister::default();
    let mut doc = Document::new(article_schema());
    doc.set("name", "draft").unwrap();
    let before = doc.changes();

    assert!(doc.save(&mut persister).is_err());

    assert_eq!(persister.attempts, 1);
    assert!(doc.is_new_record());
    assert_eq!(doc.changes(), before);
}

#[test]
fn failed_update_keeps_dirty_state_for_retry() {
    let mut persister = MemoryPersister::new();
    let mut doc = Document::new(article_schema());
    doc.set("name", "a").unwrap();
    doc.save(&mut persister).unwrap();

    doc.set("name", "b").unwrap();
    let err = doc.save(&mut FailingPersister::default()).unwrap_err();
    assert!(err.to_string().contains("update"));
    assert_eq!(
        doc.field_change("name"),
        Some(FieldChange::new(Some(Value::from("a")), Some(Value::from("b"))))
    );

    doc.save(&mut persister).unwrap();
    assert!(!doc.is_changed());
    assert_eq!(
        persister.get(doc.id()).and_then(|a| a.read("name")),
        Some(&Value::from("b"))
    );
}

#[test]
fn pristine_assignment_becomes_baseline() {
    let mut doc = loaded_article(&[("name", Value::from("old")), ("tags", array(&[7]))]);
    doc.set("name", "edited").unwrap();

    doc.assign_attributes(
        [
            ("name", Value::from("a")),
            ("tags", Value::Array(vec![Value::from("x")])),
        ],
        AssignOptions::pristine(),
    )
    .unwrap();

    assert!(!doc.is_changed());
    assert_eq!(doc.field_was("name"), Some(Value::from("a")));
    assert_eq!(
        doc.field_was("tags"),
        Some(Value::Array(vec![Value::from("x")]))
    );
}

#[test]
fn plain_assignment_is_a_change() {
    let mut doc = loaded_article(&[("name", Value::from("old"))]);
    doc.assign_attributes([("name", "new")], AssignOptions::default())
        .unwrap();

    assert_eq!(doc.field_was("name"), Some(Value::from("old")));
    assert!(doc.is_changed());
}

#[test]
fn clear_resets_even_after_in_place_mutation() {
    let mut doc = loaded_article(&[("tags", array(&[1]))]);
    doc.get_mut("tags")
        .unwrap()
        .and_then(Value::as_array_mut)
        .unwrap()
        .push(Value::Int(2));
    assert!(doc.is_changed());

    doc.clear_dirtiness();

    assert!(!doc.is_changed());
    assert_eq!(doc.field_was("tags"), Some(array(&[1, 2])));
}

#[test]
fn new_cycle_after_clear_tracks_again() {
    let mut doc = loaded_article(&[("views", Value::Int(1))]);
    doc.set("views", 2).unwrap();
    doc.after_update();
    doc.set("views", 3).unwrap();

    assert_eq!(
        doc.field_change("views"),
        Some(FieldChange::new(Some(Value::Int(2)), Some(Value::Int(3))))
    );
}
