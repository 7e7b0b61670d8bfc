//! Resolved configuration types shared across crates.
//!
//! Raw TOML structs (with `Option` fields) stay private in `frost-config`.
//! The loader resolves them into these types at the parse boundary, so every
//! value here is already defaulted and validated.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Level at which enforcement denials are logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditLevel {
    #[default]
    Warn,
    Debug,
    Off,
}

impl AuditLevel {
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "warn" | "warning" => Some(AuditLevel::Warn),
            "debug" => Some(AuditLevel::Debug),
            "off" | "none" => Some(AuditLevel::Off),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            AuditLevel::Warn => "warn",
            AuditLevel::Debug => "debug",
            AuditLevel::Off => "off",
        }
    }
}

impl fmt::Display for AuditLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreSettings {
    initial_capacity: usize,
    audit: AuditLevel,
}

impl StoreSettings {
    pub const DEFAULT_CAPACITY: usize = 64;

    #[must_use]
    pub fn new(initial_capacity: usize, audit: AuditLevel) -> Self {
        Self {
            initial_capacity,
            audit,
        }
    }

    /// Arena slots preallocated when the store is created.
    #[must_use]
    pub fn initial_capacity(&self) -> usize {
        self.initial_capacity
    }

    #[must_use]
    pub fn audit(&self) -> AuditLevel {
        self.audit
    }
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY, AuditLevel::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SerializationSettings {
    pretty: bool,
}

impl SerializationSettings {
    #[must_use]
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    #[must_use]
    pub fn pretty(&self) -> bool {
        self.pretty
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrostSettings {
    store: StoreSettings,
    serialization: SerializationSettings,
}

impl FrostSettings {
    #[must_use]
    pub fn new(store: StoreSettings, serialization: SerializationSettings) -> Self {
        Self {
            store,
            serialization,
        }
    }

    #[must_use]
    pub fn store(&self) -> StoreSettings {
        self.store
    }

    #[must_use]
    pub fn serialization(&self) -> SerializationSettings {
        self.serialization
    }
}
