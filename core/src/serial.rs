//! Serialization capability.
//!
//! Only types declared with `SchemaBuilder::serializable` export or rebuild
//! their field state. Every other type refuses, including when reached through
//! serde generically. Decoding always goes back through the construction
//! intercept, so a payload can never smuggle in undeclared fields.

use std::result::Result as StdResult;

use frost_types::{CallSite, FrostError, Result, Value};
use serde::de::{self, DeserializeSeed, Deserializer};
use serde::ser::{self, Serializer};
use serde::{Deserialize, Serialize};

use crate::audit;
use crate::instance::Instance;
use crate::registry::ImmutableType;

fn restricted(ty: &ImmutableType) -> FrostError {
    audit::deny(
        ty.audit(),
        FrostError::SerializationRestricted {
            type_name: ty.name().clone(),
        },
    )
}

impl Instance {
    /// JSON text of every set field.
    pub fn to_json(&self) -> Result<String> {
        let ty = self.ty();
        if !ty.is_serializable() {
            return Err(restricted(ty));
        }
        let caller = self.caller(CallSite::InstanceMethod);
        let object = Value::Object(ty.store().get(&caller, self.identity())?.to_object());
        let encoded = if ty.serialization().pretty() {
            serde_json::to_string_pretty(&object)
        } else {
            serde_json::to_string(&object)
        };
        encoded.map_err(|err| FrostError::Encode {
            type_name: ty.name().clone(),
            message: err.to_string(),
        })
    }
}

impl ImmutableType {
    /// Rebuild an instance from [`Instance::to_json`] output.
    pub fn from_json(&self, text: &str) -> Result<Instance> {
        if !self.is_serializable() {
            return Err(restricted(self));
        }
        let fields: Value = serde_json::from_str(text).map_err(|err| FrostError::Decode {
            type_name: self.name().clone(),
            message: err.to_string(),
        })?;
        self.construct(fields)
    }
}

impl Serialize for Instance {
    fn serialize<S>(&self, serializer: S) -> StdResult<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let ty = self.ty();
        if !ty.is_serializable() {
            return Err(ser::Error::custom(restricted(ty)));
        }
        let caller = self.caller(CallSite::InstanceMethod);
        let state = ty
            .store()
            .get(&caller, self.identity())
            .map_err(ser::Error::custom)?;
        state.to_object().serialize(serializer)
    }
}

impl<'de> DeserializeSeed<'de> for &ImmutableType {
    type Value = Instance;

    fn deserialize<D>(self, deserializer: D) -> StdResult<Instance, D::Error>
    where
        D: Deserializer<'de>,
    {
        if !self.is_serializable() {
            return Err(de::Error::custom(restricted(self)));
        }
        let fields = Value::deserialize(deserializer)?;
        self.construct(fields).map_err(de::Error::custom)
    }
}
