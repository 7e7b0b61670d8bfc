//! Kinds of code that can reach a state store.

use std::fmt;

/// Where an introspection request came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    /// Code outside the record type, e.g. a `{:?}` formatter.
    External,
    /// The record type's own privileged scope.
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallSite {
    Constructor,
    StaticFactory,
    InstanceMethod,
    Finalizer,
    Duplicate,
    /// A closure rebound to an instance it was not declared on.
    BoundClosure,
    Introspection(Origin),
    /// Anything without a receiver.
    External,
}

impl CallSite {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            CallSite::Constructor => "constructor",
            CallSite::StaticFactory => "static factory",
            CallSite::InstanceMethod => "instance method",
            CallSite::Finalizer => "finalizer",
            CallSite::Duplicate => "duplicate",
            CallSite::BoundClosure => "bound closure",
            CallSite::Introspection(Origin::External) => "introspection",
            CallSite::Introspection(Origin::Internal) => "internal introspection",
            CallSite::External => "external code",
        }
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Guarded state store operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    Set,
    SetField,
    Get,
    Destroy,
    Copy,
}

impl StoreOp {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            StoreOp::Set => "set",
            StoreOp::SetField => "set_field",
            StoreOp::Get => "get",
            StoreOp::Destroy => "destroy",
            StoreOp::Copy => "copy",
        }
    }
}

impl fmt::Display for StoreOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
