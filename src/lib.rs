//! Frost - value-level immutability for structured records.
//!
//! Declare a record type once, construct instances from a field mapping, and
//! every field becomes single-assignment: readable by anyone, writable only
//! by the constructor or through the type's own [`TypeAuthority`].
//!
//! ```
//! use frost::{FieldType, FrostError, Registry, Schema, StateStore};
//! use serde_json::json;
//!
//! let mut registry = Registry::new(StateStore::new());
//! let schema = Schema::builder("Point")
//!     .field("x", FieldType::Integer)
//!     .field("y", FieldType::Integer)
//!     .build()?;
//! let (point, _authority) = registry.declare(schema)?;
//!
//! let p = point.construct(json!({"x": 1, "y": 2}))?;
//! assert_eq!(p.get("x")?, Some(json!(1)));
//! assert!(matches!(
//!     p.assign("x", 5),
//!     Err(FrostError::ModificationRestricted { .. })
//! ));
//! # Ok::<(), FrostError>(())
//! ```

pub use frost_config::{ConfigError, config_path, load, load_from, parse};
pub use frost_core::{
    BoundScope, CallerContext, Immutable, ImmutableType, InitCapability, Instance, Record,
    Registry, StateStore, TypeAuthority,
};
pub use frost_types::settings;
pub use frost_types::{
    CallSite, Capabilities, FieldName, FieldSpec, FieldState, FieldType, FrostError, Handle,
    Lifecycle, NameError, Origin, Result, Schema, SchemaBuilder, SchemaError,
    ScopeViolationReason, StoreOp, TypeName, Value,
};
