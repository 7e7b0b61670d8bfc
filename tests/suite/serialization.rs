//! Serialization is an opt-in capability

use frost::FrostError;
use serde::de::DeserializeSeed;
use serde_json::{Deserializer as JsonDeserializer, json};

use crate::common::{declare_point, registry};

#[test]
fn point_without_opt_in_refuses_every_path() {
    let mut registry = registry();
    let point = declare_point(&mut registry, false);
    let p = point.construct(json!({"x": 1, "y": 2})).unwrap();

    let err = p.to_json().unwrap_err();
    assert!(matches!(err, FrostError::SerializationRestricted { .. }));
    assert_eq!(err.kind(), "serialization_restricted");
    assert!(matches!(
        point.from_json(r#"{"x": 1}"#),
        Err(FrostError::SerializationRestricted { .. })
    ));
    assert!(serde_json::to_value(&p).is_err());
    let mut de = JsonDeserializer::from_str(r#"{"x": 1}"#);
    assert!((&point).deserialize(&mut de).is_err());

    assert_eq!(registry.store().live_count(), 1);
}

#[test]
fn opted_in_point_round_trips() {
    let mut registry = registry();
    let point = declare_point(&mut registry, true);
    let p = point.construct(json!({"x": 1, "y": 2})).unwrap();

    let text = p.to_json().unwrap();
    let back = point.from_json(&text).unwrap();
    assert_eq!(back.get("x").unwrap(), Some(json!(1)));
    assert_eq!(back.get("y").unwrap(), Some(json!(2)));
    assert!(matches!(
        back.assign("x", 7),
        Err(FrostError::ModificationRestricted { .. })
    ));

    let value = serde_json::to_value(&back).unwrap();
    assert_eq!(value, json!({"x": 1, "y": 2}));
}

#[test]
fn decoded_partial_state_stays_partial() {
    let mut registry = registry();
    let point = declare_point(&mut registry, true);
    let p = point.from_json(r#"{"x": 5}"#).unwrap();
    assert!(p.is_set("x"));
    assert!(!p.is_set("y"));
    assert_eq!(p.to_json().unwrap(), r#"{"x":5}"#);
}
