//! Error taxonomy.
//!
//! Every variant is a contract violation by the caller, never a transient
//! fault: nothing here is worth retrying.

use std::fmt;

use thiserror::Error;

use crate::call_site::{CallSite, StoreOp};
use crate::ids::Handle;
use crate::names::{FieldName, TypeName};
use crate::schema::{FieldType, SchemaError};

pub type Result<T, E = FrostError> = std::result::Result<T, E>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeViolationReason {
    /// The caller's receiver is not the instance being operated on.
    ForeignReceiver,
    BoundClosure,
    /// A type reached its own debug hook.
    InternalIntrospection,
    ForbiddenSite { op: StoreOp, site: CallSite },
}

impl fmt::Display for ScopeViolationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScopeViolationReason::ForeignReceiver => f.write_str("caller is not the owning instance"),
            ScopeViolationReason::BoundClosure => {
                f.write_str("binding a closure to an immutable instance is not allowed")
            }
            ScopeViolationReason::InternalIntrospection => {
                f.write_str("a type must not introspect its own instances")
            }
            ScopeViolationReason::ForbiddenSite { op, site } => {
                write!(f, "`{op}` is not reachable from a {site}")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FrostError {
    #[error(
        "cannot modify immutable field {type_name}.{field}: writes are allowed only in a constructor or static factory"
    )]
    ModificationRestricted { type_name: TypeName, field: String },

    #[error("indirect modification of immutable field {type_name}.{field} is restricted")]
    IndirectModificationRestricted { type_name: TypeName, field: String },

    #[error("cannot unset immutable field {type_name}.{field}")]
    UnsetRestricted { type_name: TypeName, field: String },

    #[error("scope access violation on {identity}: {reason}")]
    ScopeViolation {
        identity: Handle,
        reason: ScopeViolationReason,
    },

    #[error("immutable values can be assigned only once: {type_name}{} on {identity}", field_suffix(.field.as_ref()))]
    AlreadyInitialized {
        type_name: TypeName,
        identity: Handle,
        field: Option<FieldName>,
    },

    #[error("{type_name} instance {identity} is already constructed")]
    DuplicateConstruction { type_name: TypeName, identity: Handle },

    #[error("immutable object context is not available for {identity}")]
    NoContext { identity: Handle },

    #[error("{type_name} declares no field `{field}`")]
    UnknownField { type_name: TypeName, field: String },

    #[error("field {type_name}.{field} expects {expected}, got {found}")]
    FieldTypeMismatch {
        type_name: TypeName,
        field: FieldName,
        expected: FieldType,
        found: &'static str,
    },

    #[error("{type_name} did not opt into serialization")]
    SerializationRestricted { type_name: TypeName },

    #[error("{type_name} is already declared immutable")]
    AlreadyDeclared { type_name: TypeName },

    #[error(transparent)]
    InvalidSchema(#[from] SchemaError),

    #[error("cannot decode {type_name}: {message}")]
    Decode { type_name: TypeName, message: String },

    #[error("cannot encode {type_name}: {message}")]
    Encode { type_name: TypeName, message: String },

    #[error("state store has no free identities left")]
    StoreExhausted,
}

fn field_suffix(field: Option<&FieldName>) -> String {
    field.map(|field| format!(".{field}")).unwrap_or_default()
}

impl FrostError {
    /// Stable kind label, used as a structured logging field.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            FrostError::ModificationRestricted { .. } => "modification_restricted",
            FrostError::IndirectModificationRestricted { .. } => {
                "indirect_modification_restricted"
            }
            FrostError::UnsetRestricted { .. } => "unset_restricted",
            FrostError::ScopeViolation { .. } => "scope_violation",
            FrostError::AlreadyInitialized { .. } => "already_initialized",
            FrostError::DuplicateConstruction { .. } => "duplicate_construction",
            FrostError::NoContext { .. } => "no_context",
            FrostError::UnknownField { .. } => "unknown_field",
            FrostError::FieldTypeMismatch { .. } => "field_type_mismatch",
            FrostError::SerializationRestricted { .. } => "serialization_restricted",
            FrostError::AlreadyDeclared { .. } => "already_declared",
            FrostError::InvalidSchema(_) => "invalid_schema",
            FrostError::Decode { .. } => "decode",
            FrostError::Encode { .. } => "encode",
            FrostError::StoreExhausted => "store_exhausted",
        }
    }
}
