//! Documents carry no locks; sharing goes through one external lock per
//! document

use crate::common::*;
use fieldtrack::Value;
use parking_lot::Mutex;
use std::sync::Arc;
use std::thread;

#[test]
fn concurrent_writers_behind_one_lock() {
    let doc = Arc::new(Mutex::new(loaded_article(&[("tags", array(&[]))])));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let doc = Arc::clone(&doc);
            thread::spawn(move || {
                let mut doc = doc.lock();
                if let Some(tags) = doc.get_mut("tags").unwrap().and_then(Value::as_array_mut) {
                    tags.push(Value::Int(i));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let doc = doc.lock();
    let change = doc.field_change("tags").unwrap();
    assert_eq!(change.old, Some(array(&[])));
    assert_eq!(change.new.unwrap().len(), Some(8));
    assert_eq!(doc.tracker().snapshots().len(), 1);
}

#[test]
fn instances_never_share_snapshots() {
    let mut a = loaded_article(&[("views", Value::Int(1))]);
    let b = a.clone();

    a.set("views", 2).unwrap();

    assert!(a.is_changed());
    assert!(!b.is_changed());
    assert!(b.tracker().snapshots().is_empty());
}
