//! The four intercepts every immutable type gets at declaration.
//!
//! - construction: validate the caller's mapping, build the full field state,
//!   register it once
//! - write: only through an [`InitCapability`], and only into unset fields
//! - indirect access: never
//! - removal: never

use frost_types::{
    CallSite, FieldState, FieldType, FrostError, Lifecycle, Result, Schema, SetOnceError,
    TypeName, Value,
};

use crate::audit;
use crate::instance::Instance;
use crate::registry::{ImmutableType, TypeAuthority};

pub(crate) fn construct(ty: &ImmutableType, fields: Value) -> Result<Instance> {
    let state = initial_state(ty.schema(), fields)?;
    let instance = Instance::reserve(ty)?;
    // On failure the reserved identity is released when `instance` drops.
    register(&instance, state)?;
    Ok(instance)
}

fn initial_state(schema: &Schema, fields: Value) -> Result<FieldState> {
    let type_name = schema.type_name();
    let fields = match fields {
        Value::Object(fields) => fields,
        other => {
            return Err(FrostError::Decode {
                type_name: type_name.clone(),
                message: format!(
                    "expected a field mapping, got {}",
                    FieldType::describe(&other)
                ),
            });
        }
    };
    let mut state = FieldState::unset(schema);
    for (name, value) in fields {
        if !schema.declares(&name) {
            return Err(FrostError::UnknownField {
                type_name: type_name.clone(),
                field: name,
            });
        }
        if value.is_null() {
            continue;
        }
        check_value(schema, &name, &value)?;
        set_initial(&mut state, &name, value)?;
    }
    Ok(state)
}

fn set_initial(state: &mut FieldState, name: &str, value: Value) -> Result<()> {
    state.set_once(name, value).map_err(|err| match err {
        SetOnceError::Unknown => FrostError::UnknownField {
            type_name: state.type_name().clone(),
            field: name.to_owned(),
        },
        SetOnceError::AlreadySet => FrostError::Decode {
            type_name: state.type_name().clone(),
            message: format!("field `{name}` given more than once"),
        },
    })
}

/// Register `state` as the instance's field state. Runs at most once.
pub(crate) fn register(instance: &Instance, state: FieldState) -> Result<()> {
    let ty = instance.ty();
    if instance.lifecycle() == Lifecycle::Initialized {
        return Err(audit::deny(
            ty.audit(),
            FrostError::DuplicateConstruction {
                type_name: ty.name().clone(),
                identity: instance.identity(),
            },
        ));
    }
    let caller = instance.caller(CallSite::Constructor);
    ty.store().set(&caller, instance.identity(), state)
}

fn check_value(schema: &Schema, field: &str, value: &Value) -> Result<()> {
    let spec = schema
        .field(field)
        .ok_or_else(|| FrostError::UnknownField {
            type_name: schema.type_name().clone(),
            field: field.to_owned(),
        })?;
    if value.is_null() || !spec.ty().accepts(value) {
        return Err(FrostError::FieldTypeMismatch {
            type_name: schema.type_name().clone(),
            field: spec.name().clone(),
            expected: spec.ty(),
            found: FieldType::describe(value),
        });
    }
    Ok(())
}

pub(crate) fn deny_write(instance: &Instance, field: &str) -> FrostError {
    let ty = instance.ty();
    audit::deny(
        ty.audit(),
        FrostError::ModificationRestricted {
            type_name: ty.name().clone(),
            field: field.to_owned(),
        },
    )
}

pub(crate) fn deny_alias(instance: &Instance, field: &str) -> FrostError {
    let ty = instance.ty();
    audit::deny(
        ty.audit(),
        FrostError::IndirectModificationRestricted {
            type_name: ty.name().clone(),
            field: field.to_owned(),
        },
    )
}

pub(crate) fn deny_unset(instance: &Instance, field: &str) -> FrostError {
    let ty = instance.ty();
    audit::deny(
        ty.audit(),
        FrostError::UnsetRestricted {
            type_name: ty.name().clone(),
            field: field.to_owned(),
        },
    )
}

/// Proof that the holder runs in the privileged scope of an instance's type.
///
/// Obtained only from [`TypeAuthority::privileged`] and bound to one instance
/// for as long as the borrow lasts.
///
/// ```compile_fail
/// fn forge<'a>(
///     authority: &'a frost_core::TypeAuthority,
///     instance: &'a frost_core::Instance,
/// ) -> frost_core::InitCapability<'a> {
///     frost_core::InitCapability { authority, instance }
/// }
/// ```
#[derive(Debug)]
#[must_use = "a capability does nothing until written through"]
pub struct InitCapability<'a> {
    authority: &'a TypeAuthority,
    instance: &'a Instance,
}

impl<'a> InitCapability<'a> {
    pub(crate) fn new(authority: &'a TypeAuthority, instance: &'a Instance) -> Self {
        Self {
            authority,
            instance,
        }
    }

    #[must_use]
    pub fn instance(&self) -> &Instance {
        self.instance
    }

    #[must_use]
    pub fn type_name(&self) -> &TypeName {
        self.authority.ty().name()
    }

    /// Set one currently unset field.
    ///
    /// Fails with `ModificationRestricted` when the capability belongs to a
    /// different type, `AlreadyInitialized` when the field holds a value.
    pub fn write(&mut self, field: &str, value: impl Into<Value>) -> Result<()> {
        let instance = self.instance;
        let ty = instance.ty();
        if !self.authority.ty().same_type(ty) {
            return Err(deny_write(instance, field));
        }
        let value = value.into();
        check_value(ty.schema(), field, &value)?;
        let caller = instance.caller(CallSite::StaticFactory);
        ty.store()
            .set_field(&caller, instance.identity(), field, value)
    }
}
