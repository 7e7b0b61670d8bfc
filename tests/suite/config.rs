//! Settings loaded from disk drive the registry

use std::fs;

use frost::settings::AuditLevel;
use frost::{Registry, load_from};
use serde_json::json;

use crate::common::declare_point;

#[test]
fn settings_from_file_reach_the_store_and_serializer() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        "[store]\ninitial_capacity = 4\n\n[audit]\ndenials = \"off\"\n\n[serialization]\npretty = true\n",
    )
    .unwrap();

    let settings = load_from(&path).unwrap();
    let mut registry = Registry::with_settings(&settings);
    assert_eq!(registry.store().settings().initial_capacity(), 4);
    assert_eq!(registry.store().settings().audit(), AuditLevel::Off);

    let point = declare_point(&mut registry, true);
    let p = point.construct(json!({"y": 2})).unwrap();
    assert_eq!(p.to_json().unwrap(), "{\n  \"y\": 2\n}");
}

#[test]
fn invalid_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[audit]\ndenials = 3\n").unwrap();
    assert!(load_from(&path).is_err());
}
