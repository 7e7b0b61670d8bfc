//! Declared field sets.
//!
//! A [`Schema`] is the closed, ordered list of fields a record type declares,
//! fixed at declaration time. Invariants enforced by [`SchemaBuilder::build`]:
//!
//! - every type and field name is a valid [`TypeName`]/[`FieldName`]
//! - no field name appears twice

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::names::{FieldName, NameError, TypeName};

/// Value shape a field accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    #[default]
    Any,
    Bool,
    Integer,
    /// Any JSON number; integers are accepted.
    Float,
    String,
    Array,
    Object,
}

impl FieldType {
    #[must_use]
    pub fn accepts(self, value: &Value) -> bool {
        match self {
            FieldType::Any => true,
            FieldType::Bool => value.is_boolean(),
            FieldType::Integer => value.is_i64() || value.is_u64(),
            FieldType::Float => value.is_number(),
            FieldType::String => value.is_string(),
            FieldType::Array => value.is_array(),
            FieldType::Object => value.is_object(),
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::Any => "any",
            FieldType::Bool => "bool",
            FieldType::Integer => "integer",
            FieldType::Float => "float",
            FieldType::String => "string",
            FieldType::Array => "array",
            FieldType::Object => "object",
        }
    }

    /// Short name of the JSON shape of `value`, for error messages.
    #[must_use]
    pub fn describe(value: &Value) -> &'static str {
        match value {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(n) if n.is_f64() => "float",
            Value::Number(_) => "integer",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    name: FieldName,
    ty: FieldType,
}

impl FieldSpec {
    #[must_use]
    pub fn name(&self) -> &FieldName {
        &self.name
    }

    #[must_use]
    pub fn ty(&self) -> FieldType {
        self.ty
    }
}

/// Optional behaviour a type opts into at declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Capabilities {
    serializable: bool,
}

impl Capabilities {
    #[must_use]
    pub fn serializable(self) -> bool {
        self.serializable
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("invalid type name: {0}")]
    TypeName(NameError),
    #[error("invalid field name: {0}")]
    FieldName(NameError),
    #[error("field `{field}` declared twice on {type_name}")]
    DuplicateField { type_name: String, field: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schema {
    type_name: TypeName,
    fields: Vec<FieldSpec>,
    capabilities: Capabilities,
}

impl Schema {
    #[must_use]
    pub fn builder(type_name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder {
            type_name: type_name.into(),
            fields: Vec::new(),
            capabilities: Capabilities::default(),
        }
    }

    #[must_use]
    pub fn type_name(&self) -> &TypeName {
        &self.type_name
    }

    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|spec| spec.name.as_str() == name)
    }

    #[must_use]
    pub fn declares(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    #[must_use]
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }
}

#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    type_name: String,
    fields: Vec<(String, FieldType)>,
    capabilities: Capabilities,
}

impl SchemaBuilder {
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, ty: FieldType) -> Self {
        self.fields.push((name.into(), ty));
        self
    }

    /// Opt into the serialization capability.
    #[must_use]
    pub fn serializable(mut self) -> Self {
        self.capabilities.serializable = true;
        self
    }

    pub fn build(self) -> Result<Schema, SchemaError> {
        let type_name = TypeName::new(self.type_name).map_err(SchemaError::TypeName)?;
        let mut seen = HashSet::with_capacity(self.fields.len());
        let mut fields = Vec::with_capacity(self.fields.len());
        for (raw, ty) in self.fields {
            let name = FieldName::new(raw).map_err(SchemaError::FieldName)?;
            if !seen.insert(name.clone()) {
                return Err(SchemaError::DuplicateField {
                    type_name: type_name.to_string(),
                    field: name.into_inner(),
                });
            }
            fields.push(FieldSpec { name, ty });
        }
        Ok(Schema {
            type_name,
            fields,
            capabilities: self.capabilities,
        })
    }
}
