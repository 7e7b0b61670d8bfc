//! The state store refuses everything but the owning instance's own frames

use frost::{
    CallerContext, FieldState, FieldType, FrostError, Lifecycle, Schema, ScopeViolationReason,
};
use serde_json::json;

use crate::common::{declare_point, registry};

fn assert_foreign(err: FrostError) {
    assert!(
        matches!(
            err,
            FrostError::ScopeViolation {
                reason: ScopeViolationReason::ForeignReceiver,
                ..
            }
        ),
        "expected a foreign-receiver scope violation, got {err:?}"
    );
}

#[test]
fn outside_code_cannot_set_get_or_destroy() {
    let mut registry = registry();
    let point = declare_point(&mut registry, false);
    let p = point.construct(json!({"x": 200})).unwrap();
    let store = registry.store();
    let outside = CallerContext::external();

    assert_foreign(
        store
            .set(&outside, p.identity(), FieldState::unset(point.schema()))
            .unwrap_err(),
    );
    assert_foreign(store.get(&outside, p.identity()).unwrap_err());
    assert_foreign(store.destroy(&outside, p.identity()).unwrap_err());
    assert_foreign(
        store
            .set_field(&outside, p.identity(), "y", json!(1))
            .unwrap_err(),
    );

    assert_eq!(p.lifecycle(), Lifecycle::Initialized);
    assert_eq!(p.get("x").unwrap(), Some(json!(200)));
}

#[test]
fn outside_code_cannot_copy_into_an_instance() {
    let mut registry = registry();
    let point = declare_point(&mut registry, false);
    let a = point.construct(json!({"x": 1})).unwrap();
    let b = point.construct(json!({"x": 2})).unwrap();
    let err = registry
        .store()
        .copy(&CallerContext::external(), a.identity(), b.identity())
        .unwrap_err();
    assert_foreign(err);
    assert_eq!(b.get("x").unwrap(), Some(json!(2)));
}

#[test]
fn outside_code_cannot_swap_in_another_types_state() {
    let mut registry = registry();
    let declared = declare_point(&mut registry, false);
    let other = Schema::builder("Loose").build().unwrap();
    let state = FieldState::unset(&other);
    let p = declared.construct(json!({})).unwrap();
    let err = registry
        .store()
        .set(&CallerContext::external(), p.identity(), state)
        .unwrap_err();
    assert_foreign(err);
}

#[test]
fn type_debug_hook_is_a_scope_violation() {
    let mut registry = registry();
    let schema = Schema::builder("Secret")
        .field("pin", FieldType::Integer)
        .build()
        .unwrap();
    let (secret, authority) = registry.declare(schema).unwrap();
    let s = secret.construct(json!({"pin": 1234})).unwrap();
    assert!(matches!(
        authority.introspect(&s),
        Err(FrostError::ScopeViolation {
            reason: ScopeViolationReason::InternalIntrospection,
            ..
        })
    ));
    assert_eq!(format!("{s:?}"), "Secret { pin: 1234 }");
}
