//! Out-of-band field storage for one immutable instance.
//!
//! # Invariants
//!
//! - Slots are exactly the declared field set, in declaration order
//! - A slot goes from unset to set at most once; nothing unsets it

use std::fmt;

use serde_json::{Map, Value};

use crate::names::{FieldName, TypeName};
use crate::schema::Schema;

/// Per-instance lifecycle as observed through the state store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    /// The identity was never issued by this store.
    Uninitialized,
    /// Identity reserved, field state not yet registered.
    Constructing,
    Initialized,
    Destroyed,
}

impl Lifecycle {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Lifecycle::Uninitialized => "uninitialized",
            Lifecycle::Constructing => "constructing",
            Lifecycle::Initialized => "initialized",
            Lifecycle::Destroyed => "destroyed",
        }
    }
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOnceError {
    Unknown,
    AlreadySet,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldState {
    type_name: TypeName,
    slots: Vec<(FieldName, Option<Value>)>,
}

impl FieldState {
    /// Every declared field of `schema`, all unset.
    #[must_use]
    pub fn unset(schema: &Schema) -> Self {
        Self {
            type_name: schema.type_name().clone(),
            slots: schema
                .fields()
                .iter()
                .map(|spec| (spec.name().clone(), None))
                .collect(),
        }
    }

    #[must_use]
    pub fn type_name(&self) -> &TypeName {
        &self.type_name
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.slot(name).and_then(Option::as_ref)
    }

    #[must_use]
    pub fn is_set(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    #[must_use]
    pub fn declares(&self, name: &str) -> bool {
        self.slot(name).is_some()
    }

    /// All declared fields with their value, `None` when unset.
    pub fn iter(&self) -> impl Iterator<Item = (&FieldName, Option<&Value>)> {
        self.slots.iter().map(|(name, value)| (name, value.as_ref()))
    }

    /// Only the fields that hold a value.
    pub fn iter_set(&self) -> impl Iterator<Item = (&FieldName, &Value)> {
        self.slots
            .iter()
            .filter_map(|(name, value)| value.as_ref().map(|value| (name, value)))
    }

    #[must_use]
    pub fn set_count(&self) -> usize {
        self.iter_set().count()
    }

    /// Fill a currently unset slot.
    pub fn set_once(&mut self, name: &str, value: Value) -> Result<(), SetOnceError> {
        let slot = self
            .slots
            .iter_mut()
            .find(|(declared, _)| declared.as_str() == name)
            .map(|(_, slot)| slot)
            .ok_or(SetOnceError::Unknown)?;
        if slot.is_some() {
            return Err(SetOnceError::AlreadySet);
        }
        *slot = Some(value);
        Ok(())
    }

    /// JSON object of the set fields, keyed in sorted field-name order.
    #[must_use]
    pub fn to_object(&self) -> Map<String, Value> {
        self.iter_set()
            .map(|(name, value)| (name.as_str().to_owned(), value.clone()))
            .collect()
    }

    /// Overwrite a slot regardless of its state. Test back door only.
    #[cfg(feature = "test-support")]
    pub fn force(&mut self, name: &str, value: Option<Value>) -> bool {
        match self
            .slots
            .iter_mut()
            .find(|(declared, _)| declared.as_str() == name)
        {
            Some((_, slot)) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    fn slot(&self, name: &str) -> Option<&Option<Value>> {
        self.slots
            .iter()
            .find(|(declared, _)| declared.as_str() == name)
            .map(|(_, value)| value)
    }
}
