//! Core domain types for Frost.
//!
//! This crate contains pure domain types with no IO, no locking, and minimal
//! dependencies: names, identities, schemas, field state and the error
//! taxonomy shared by the state store and the enforcement layer.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory

mod call_site;
mod error;
mod ids;
mod names;
mod schema;
pub mod settings;
mod state;

pub use call_site::{CallSite, Origin, StoreOp};
pub use error::{FrostError, Result, ScopeViolationReason};
pub use ids::Handle;
pub use names::{FieldName, NameError, TypeName};
pub use schema::{Capabilities, FieldSpec, FieldType, Schema, SchemaBuilder, SchemaError};
pub use state::{FieldState, Lifecycle, SetOnceError};

/// Field values are plain JSON values.
pub use serde_json::Value;
