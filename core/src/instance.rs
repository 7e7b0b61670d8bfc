//! Immutable instances.
//!
//! An [`Instance`] owns nothing but its type and identity. Every field lives
//! in the state store; reads go through the store's guard, and every mutating
//! entry point here is an intercept that refuses.

use std::fmt;

use frost_types::{CallSite, FieldState, Handle, Lifecycle, Origin, Result, TypeName, Value};

use crate::context::CallerContext;
use crate::intercept;
use crate::registry::ImmutableType;

pub struct Instance {
    ty: ImmutableType,
    identity: Handle,
}

impl Instance {
    pub(crate) fn reserve(ty: &ImmutableType) -> Result<Self> {
        Ok(Self {
            ty: ty.clone(),
            identity: ty.store().reserve()?,
        })
    }

    pub(crate) fn caller(&self, site: CallSite) -> CallerContext {
        CallerContext::for_instance(self.identity, site)
    }

    #[must_use]
    pub fn identity(&self) -> Handle {
        self.identity
    }

    #[must_use]
    pub fn ty(&self) -> &ImmutableType {
        &self.ty
    }

    #[must_use]
    pub fn type_name(&self) -> &TypeName {
        self.ty.name()
    }

    #[must_use]
    pub fn lifecycle(&self) -> Lifecycle {
        self.ty.store().lifecycle(self.identity)
    }

    /// Value of `field`, `None` when it was never set.
    pub fn get(&self, field: &str) -> Result<Option<Value>> {
        let caller = self.caller(CallSite::InstanceMethod);
        self.ty
            .store()
            .with_field(&caller, self.identity, field, |value| value.cloned())
    }

    /// Whether `field` is declared and holds a value.
    #[must_use]
    pub fn is_set(&self, field: &str) -> bool {
        let caller = self.caller(CallSite::InstanceMethod);
        self.ty
            .store()
            .with_field(&caller, self.identity, field, |value| value.is_some())
            .unwrap_or(false)
    }

    /// Run `f` on a read-only reference to `field` without cloning it.
    pub fn inspect<R>(&self, field: &str, f: impl FnOnce(&Value) -> R) -> Result<Option<R>> {
        let caller = self.caller(CallSite::InstanceMethod);
        self.ty
            .store()
            .with_field(&caller, self.identity, field, |value| value.map(f))
    }

    /// Snapshot of every field. Changing the snapshot changes nothing stored.
    pub fn fields(&self) -> Result<FieldState> {
        let caller = self.caller(CallSite::InstanceMethod);
        self.ty.store().get(&caller, self.identity)
    }

    /// Plain assignment. Always refused: privileged writes go through
    /// [`TypeAuthority::privileged`](crate::TypeAuthority::privileged).
    pub fn assign(&self, field: &str, _value: impl Into<Value>) -> Result<()> {
        Err(intercept::deny_write(self, field))
    }

    /// Mutable alias to a field's storage. Always refused.
    pub fn field_mut(&mut self, field: &str) -> Result<&mut Value> {
        Err(intercept::deny_alias(self, field))
    }

    /// Field removal. Always refused.
    pub fn unset(&mut self, field: &str) -> Result<()> {
        Err(intercept::deny_unset(self, field))
    }

    /// Clone into a new identity. The two instances share no storage.
    pub fn duplicate(&self) -> Result<Instance> {
        let copy = Instance::reserve(&self.ty)?;
        let caller = copy.caller(CallSite::Duplicate);
        self.ty.store().copy(&caller, self.identity, copy.identity)?;
        tracing::debug!(source = %self.identity, copy = %copy.identity, "Duplicated instance");
        Ok(copy)
    }

    /// Run `f` as a closure rebound to this instance.
    ///
    /// Rebinding grants no privilege: every store access from the scope is a
    /// scope violation and every write is refused.
    pub fn bind<R>(&self, f: impl FnOnce(BoundScope<'_>) -> R) -> R {
        f(BoundScope { instance: self })
    }
}

impl Drop for Instance {
    fn drop(&mut self) {
        let caller = self.caller(CallSite::Finalizer);
        if let Err(err) = self.ty.store().destroy(&caller, self.identity) {
            tracing::warn!(identity = %self.identity, "Failed to destroy field state: {err}");
        }
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let caller = self.caller(CallSite::Introspection(Origin::External));
        match self.ty.store().get(&caller, self.identity) {
            Ok(state) => {
                let mut out = f.debug_struct(self.type_name().as_str());
                for (name, value) in state.iter_set() {
                    out.field(name.as_str(), &format_args!("{value}"));
                }
                out.finish()
            }
            Err(_) => write!(f, "{} <{}>", self.type_name(), self.lifecycle()),
        }
    }
}

/// What a closure rebound to an instance can reach.
#[derive(Debug, Clone, Copy)]
pub struct BoundScope<'a> {
    instance: &'a Instance,
}

impl BoundScope<'_> {
    #[must_use]
    pub fn instance(&self) -> &Instance {
        self.instance
    }

    pub fn fields(&self) -> Result<FieldState> {
        let caller = self.instance.caller(CallSite::BoundClosure);
        self.instance
            .ty()
            .store()
            .get(&caller, self.instance.identity())
    }

    pub fn register(&self, fields: FieldState) -> Result<()> {
        let caller = self.instance.caller(CallSite::BoundClosure);
        self.instance
            .ty()
            .store()
            .set(&caller, self.instance.identity(), fields)
    }

    pub fn destroy(&self) -> Result<()> {
        let caller = self.instance.caller(CallSite::BoundClosure);
        self.instance
            .ty()
            .store()
            .destroy(&caller, self.instance.identity())
    }

    pub fn assign(&self, field: &str, value: impl Into<Value>) -> Result<()> {
        self.instance.assign(field, value)
    }
}
