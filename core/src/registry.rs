//! Type declaration.
//!
//! Declaring a schema installs the enforcement intercepts for that type exactly
//! once and splits the result into two halves:
//!
//! - [`ImmutableType`]: the public face consumers use to construct and decode
//!   instances. Cheap to clone.
//! - [`TypeAuthority`]: the type's privileged scope, standing in for its static
//!   factory methods. It is the only source of [`InitCapability`] tokens and
//!   cannot be cloned.
//!
//! ```compile_fail
//! fn leak(authority: &frost_core::TypeAuthority) -> frost_core::TypeAuthority {
//!     authority.clone()
//! }
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use frost_types::settings::{AuditLevel, FrostSettings, SerializationSettings};
use frost_types::{CallSite, FieldState, FrostError, Origin, Result, Schema, TypeName, Value};

use crate::instance::Instance;
use crate::intercept::{self, InitCapability};
use crate::store::StateStore;

#[derive(Debug)]
struct TypeDescriptor {
    schema: Schema,
    serialization: SerializationSettings,
}

#[derive(Debug, Clone)]
pub struct ImmutableType {
    descriptor: Arc<TypeDescriptor>,
    store: StateStore,
}

impl ImmutableType {
    #[must_use]
    pub fn name(&self) -> &TypeName {
        self.descriptor.schema.type_name()
    }

    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.descriptor.schema
    }

    #[must_use]
    pub fn store(&self) -> &StateStore {
        &self.store
    }

    #[must_use]
    pub fn is_serializable(&self) -> bool {
        self.descriptor.schema.capabilities().serializable()
    }

    /// Construct an instance from a field mapping (a JSON object).
    ///
    /// Unknown names fail with `UnknownField`; absent or `null` fields stay
    /// unset.
    pub fn construct(&self, fields: Value) -> Result<Instance> {
        intercept::construct(self, fields)
    }

    /// Whether both handles come from the same declaration.
    #[must_use]
    pub fn same_type(&self, other: &ImmutableType) -> bool {
        Arc::ptr_eq(&self.descriptor, &other.descriptor)
    }

    pub(crate) fn serialization(&self) -> SerializationSettings {
        self.descriptor.serialization
    }

    pub(crate) fn audit(&self) -> AuditLevel {
        self.store.settings().audit()
    }
}

#[derive(Debug)]
pub struct TypeAuthority {
    ty: ImmutableType,
}

impl TypeAuthority {
    #[must_use]
    pub fn ty(&self) -> &ImmutableType {
        &self.ty
    }

    pub fn construct(&self, fields: Value) -> Result<Instance> {
        self.ty.construct(fields)
    }

    /// Open a privileged write scope on `instance`.
    ///
    /// Writes through the capability fill currently unset fields only, and
    /// only when `instance` belongs to this authority's type.
    #[must_use]
    pub fn privileged<'a>(&'a self, instance: &'a Instance) -> InitCapability<'a> {
        InitCapability::new(self, instance)
    }

    /// The type's own debug hook. Reaching field storage this way is a scope
    /// violation: introspection is only for code outside the type.
    pub fn introspect(&self, instance: &Instance) -> Result<FieldState> {
        let caller = instance.caller(CallSite::Introspection(Origin::Internal));
        instance
            .ty()
            .store()
            .get(&caller, instance.identity())
    }
}

/// Declared immutable types sharing one state store.
#[derive(Debug)]
pub struct Registry {
    store: StateStore,
    serialization: SerializationSettings,
    types: HashMap<TypeName, ImmutableType>,
}

impl Registry {
    #[must_use]
    pub fn new(store: StateStore) -> Self {
        Self {
            store,
            serialization: SerializationSettings::default(),
            types: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_settings(settings: &FrostSettings) -> Self {
        Self {
            store: StateStore::with_settings(settings.store()),
            serialization: settings.serialization(),
            types: HashMap::new(),
        }
    }

    #[must_use]
    pub fn store(&self) -> &StateStore {
        &self.store
    }

    /// Declare `schema` immutable. A type name can be declared only once.
    pub fn declare(&mut self, schema: Schema) -> Result<(ImmutableType, TypeAuthority)> {
        if self.types.contains_key(schema.type_name()) {
            let type_name = schema.type_name().clone();
            tracing::warn!(%type_name, "Type declared immutable twice");
            return Err(FrostError::AlreadyDeclared { type_name });
        }
        tracing::debug!(
            type_name = %schema.type_name(),
            fields = schema.fields().len(),
            serializable = schema.capabilities().serializable(),
            "Installed immutable intercepts"
        );
        let ty = ImmutableType {
            descriptor: Arc::new(TypeDescriptor {
                schema,
                serialization: self.serialization,
            }),
            store: self.store.clone(),
        };
        self.types.insert(ty.name().clone(), ty.clone());
        Ok((ty.clone(), TypeAuthority { ty }))
    }

    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<ImmutableType> {
        self.types.get(name).cloned()
    }

    /// Declared type names, sorted.
    #[must_use]
    pub fn declared(&self) -> Vec<&TypeName> {
        let mut names: Vec<&TypeName> = self.types.keys().collect();
        names.sort();
        names
    }
}
