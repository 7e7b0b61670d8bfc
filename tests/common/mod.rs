//! Shared test utilities and fixtures
//!
//! Record types used across the integration suite.

#![allow(dead_code)]

use frost::{
    FieldType, ImmutableType, Instance, Record, Registry, Result, Schema, StateStore,
    TypeAuthority,
};
use serde_json::json;

pub fn registry() -> Registry {
    Registry::new(StateStore::new())
}

/// Declare `Point { x: integer, y: integer }`, optionally serializable.
pub fn declare_point(registry: &mut Registry, serializable: bool) -> ImmutableType {
    let builder = Schema::builder("Point")
        .field("x", FieldType::Integer)
        .field("y", FieldType::Integer);
    let schema = if serializable {
        builder.serializable()
    } else {
        builder
    }
    .build()
    .expect("point schema is valid");
    registry.declare(schema).expect("Point declared once").0
}

/// A record with a static factory that fills `balance` after construction.
pub struct Account(Instance);

impl Account {
    pub fn declare(registry: &mut Registry) -> TypeAuthority {
        let schema = Schema::builder("Account")
            .field("owner", FieldType::String)
            .field("balance", FieldType::Integer)
            .build()
            .expect("account schema is valid");
        registry.declare(schema).expect("Account declared once").1
    }

    pub fn open(authority: &TypeAuthority, owner: &str, deposit: i64) -> Result<Self> {
        let instance = authority.construct(json!({ "owner": owner }))?;
        authority.privileged(&instance).write("balance", deposit)?;
        Ok(Self(instance))
    }

    /// A second privileged write to `balance`; always too late.
    pub fn reset_balance(&self, authority: &TypeAuthority, balance: i64) -> Result<()> {
        authority.privileged(&self.0).write("balance", balance)
    }

    pub fn balance(&self) -> Option<i64> {
        self.0
            .get("balance")
            .ok()
            .flatten()
            .and_then(|value| value.as_i64())
    }
}

impl Record for Account {
    fn instance(&self) -> &Instance {
        &self.0
    }

    fn instance_mut(&mut self) -> &mut Instance {
        &mut self.0
    }
}
