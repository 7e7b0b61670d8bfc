//! Duplication produces independent instances

use frost::Lifecycle;
use serde_json::json;

use crate::common::{declare_point, registry};

#[test]
fn clone_reads_original_values() {
    let mut registry = registry();
    let point = declare_point(&mut registry, false);
    let p = point.construct(json!({"x": 1, "y": 2})).unwrap();
    let p2 = p.duplicate().unwrap();
    assert_eq!(p2.get("x").unwrap(), Some(json!(1)));
    assert_ne!(p.identity(), p2.identity());
}

#[test]
fn destroying_original_keeps_clone() {
    let mut registry = registry();
    let point = declare_point(&mut registry, false);
    let p = point.construct(json!({"x": 1, "y": 2})).unwrap();
    let p2 = p.duplicate().unwrap();
    let original = p.identity();
    drop(p);
    assert_eq!(registry.store().lifecycle(original), Lifecycle::Destroyed);
    assert_eq!(p2.get("x").unwrap(), Some(json!(1)));
    assert_eq!(registry.store().live_count(), 1);
}

#[test]
fn tampering_with_one_copy_leaves_the_other() {
    let mut registry = registry();
    let point = declare_point(&mut registry, false);
    let p = point.construct(json!({"x": 1, "y": 2})).unwrap();
    let p2 = p.duplicate().unwrap();
    let store = registry.store();

    assert!(store.tamper(p2.identity(), "x", Some(json!(99))));
    assert_eq!(p.get("x").unwrap(), Some(json!(1)));
    assert_eq!(p2.get("x").unwrap(), Some(json!(99)));

    assert!(store.tamper(p.identity(), "y", None));
    assert_eq!(p.get("y").unwrap(), None);
    assert_eq!(p2.get("y").unwrap(), Some(json!(2)));
}

#[test]
fn destroyed_identities_are_not_reused_by_live_instances() {
    let mut registry = registry();
    let point = declare_point(&mut registry, false);
    let first = point.construct(json!({"x": 1})).unwrap();
    let stale = first.identity();
    drop(first);
    let second = point.construct(json!({"x": 2})).unwrap();
    assert_eq!(second.identity().slot(), stale.slot());
    assert_ne!(second.identity(), stale);
    assert_eq!(registry.store().lifecycle(stale), Lifecycle::Destroyed);
}
