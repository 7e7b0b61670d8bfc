//! State store and enforcement layer for Frost.
//!
//! Field data for every immutable instance lives in a [`StateStore`], outside
//! the instance value. The enforcement layer installed by
//! [`Registry::declare`] is the only code that reaches the store on an
//! instance's behalf, and it writes only from the construction intercept or
//! through an [`InitCapability`] handed out by the type's [`TypeAuthority`].

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory

mod access;
mod audit;
mod context;
mod instance;
mod intercept;
mod registry;
mod serial;
mod store;

pub use access::{Immutable, Record};
pub use context::CallerContext;
pub use instance::{BoundScope, Instance};
pub use intercept::InitCapability;
pub use registry::{ImmutableType, Registry, TypeAuthority};
pub use store::StateStore;
