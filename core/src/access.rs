//! The field access interface.
//!
//! [`Immutable`] is the only way to reach an instance's fields. It is
//! implemented once, for every [`Record`], so a record type cannot replace
//! the intercepts with its own versions.

use frost_types::{Result, Value};

use crate::instance::Instance;

/// A user type backed by an immutable instance.
pub trait Record {
    fn instance(&self) -> &Instance;

    fn instance_mut(&mut self) -> &mut Instance;
}

impl Record for Instance {
    fn instance(&self) -> &Instance {
        self
    }

    fn instance_mut(&mut self) -> &mut Instance {
        self
    }
}

pub trait Immutable {
    fn read_field(&self, field: &str) -> Result<Option<Value>>;

    fn has_field(&self, field: &str) -> bool;

    /// Always fails with `ModificationRestricted`.
    fn write_field(&self, field: &str, value: Value) -> Result<()>;

    /// Always fails with `IndirectModificationRestricted`.
    fn field_alias(&mut self, field: &str) -> Result<&mut Value>;

    /// Always fails with `UnsetRestricted`.
    fn delete_field(&mut self, field: &str) -> Result<()>;
}

impl<T: Record + ?Sized> Immutable for T {
    fn read_field(&self, field: &str) -> Result<Option<Value>> {
        self.instance().get(field)
    }

    fn has_field(&self, field: &str) -> bool {
        self.instance().is_set(field)
    }

    fn write_field(&self, field: &str, value: Value) -> Result<()> {
        self.instance().assign(field, value)
    }

    fn field_alias(&mut self, field: &str) -> Result<&mut Value> {
        self.instance_mut().field_mut(field)
    }

    fn delete_field(&mut self, field: &str) -> Result<()> {
        self.instance_mut().unset(field)
    }
}
