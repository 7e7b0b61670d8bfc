//! Point scenarios: reads, refused writes, refused aliases and removals

use frost::{FrostError, Immutable, Lifecycle};
use serde_json::json;

use crate::common::{declare_point, registry};

#[test]
fn reads_return_constructed_values() {
    let mut registry = registry();
    let point = declare_point(&mut registry, false);
    let p = point.construct(json!({"x": 1, "y": 2})).unwrap();
    assert_eq!(p.get("x").unwrap(), Some(json!(1)));
    assert_eq!(p.get("y").unwrap(), Some(json!(2)));
    assert_eq!(p.lifecycle(), Lifecycle::Initialized);
}

#[test]
fn write_names_type_and_field() {
    let mut registry = registry();
    let point = declare_point(&mut registry, false);
    let p = point.construct(json!({"x": 1, "y": 2})).unwrap();
    let err = p.assign("x", 5).unwrap_err();
    match &err {
        FrostError::ModificationRestricted { type_name, field } => {
            assert_eq!(type_name.as_str(), "Point");
            assert_eq!(field, "x");
        }
        other => panic!("expected ModificationRestricted, got {other:?}"),
    }
    assert!(err.to_string().contains("Point.x"));
    assert_eq!(p.get("x").unwrap(), Some(json!(1)));
}

#[test]
fn every_field_refuses_every_mutation() {
    let mut registry = registry();
    let point = declare_point(&mut registry, false);
    let mut p = point.construct(json!({"x": 1})).unwrap();
    for field in ["x", "y"] {
        assert!(matches!(
            p.write_field(field, json!(42)),
            Err(FrostError::ModificationRestricted { .. })
        ));
        assert!(matches!(
            p.field_alias(field),
            Err(FrostError::IndirectModificationRestricted { .. })
        ));
        assert!(matches!(
            p.delete_field(field),
            Err(FrostError::UnsetRestricted { .. })
        ));
    }
    assert_eq!(p.get("x").unwrap(), Some(json!(1)));
    assert_eq!(p.get("y").unwrap(), None);
}

#[test]
fn omitted_field_reads_as_absent() {
    let mut registry = registry();
    let point = declare_point(&mut registry, false);
    let p = point.construct(json!({"y": 2})).unwrap();
    assert!(!p.is_set("x"));
    assert!(p.is_set("y"));
    assert!(!p.is_set("z"));
    assert_eq!(p.get("x").unwrap(), None);
}

#[test]
fn unknown_constructor_field_is_rejected() {
    let mut registry = registry();
    let point = declare_point(&mut registry, false);
    let err = point.construct(json!({"x": 1, "z": 3})).unwrap_err();
    assert!(matches!(
        err,
        FrostError::UnknownField { ref field, .. } if field == "z"
    ));
    assert_eq!(registry.store().live_count(), 0);
}

#[test]
fn bound_closure_cannot_write() {
    let mut registry = registry();
    let point = declare_point(&mut registry, false);
    let p = point.construct(json!({"x": 1})).unwrap();
    let result = p.bind(|scope| scope.assign("x", 42));
    assert!(matches!(
        result,
        Err(FrostError::ModificationRestricted { .. })
    ));
    let result = p.bind(|scope| scope.fields());
    assert!(matches!(result, Err(FrostError::ScopeViolation { .. })));
}

#[test]
fn debug_output_exports_state() {
    let mut registry = registry();
    let point = declare_point(&mut registry, false);
    let p = point.construct(json!({"x": 1, "y": 2})).unwrap();
    assert_eq!(format!("{p:?}"), "Point { x: 1, y: 2 }");
}
