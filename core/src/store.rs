//! The state store: out-of-band field storage for every immutable instance.
//!
//! Field state lives in an arena of slots addressed by [`Handle`]. A slot is
//! reserved when construction begins, becomes live when the construction
//! intercept registers the full field mapping, and returns to the free list
//! with a bumped generation when the instance is destroyed.
//!
//! Every operation that touches field data runs the scope guard first:
//!
//! 1. the caller's receiver must be the instance operated on
//! 2. bound closures are always rejected
//! 3. a type introspecting its own instances is rejected
//! 4. the call site must be on the operation's allow-list
//!
//! One `RwLock` guards the whole table. Mutations validate before writing, so
//! a poisoned lock never exposes a half-applied update and is recovered.

use std::num::NonZeroU32;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use frost_types::settings::StoreSettings;
use frost_types::{
    CallSite, FieldName, FieldState, FrostError, Handle, Lifecycle, Origin, Result,
    ScopeViolationReason, SetOnceError, StoreOp, Value,
};

use crate::audit;
use crate::context::CallerContext;

#[derive(Debug)]
enum SlotState {
    Vacant,
    Constructing,
    Live(FieldState),
}

#[derive(Debug)]
struct Slot {
    generation: NonZeroU32,
    state: SlotState,
}

#[derive(Debug, Default)]
struct Arena {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
}

impl Arena {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            live: 0,
        }
    }

    /// `None` once every `u32` slot is in use.
    fn reserve(&mut self) -> Option<Handle> {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.state = SlotState::Constructing;
            return Some(Handle::new(index, slot.generation));
        }
        let index = next_index(self.slots.len())?;
        self.slots.push(Slot {
            generation: NonZeroU32::MIN,
            state: SlotState::Constructing,
        });
        Some(Handle::new(index, NonZeroU32::MIN))
    }

    fn slot(&self, identity: Handle) -> Option<&SlotState> {
        self.slots
            .get(identity.slot() as usize)
            .filter(|slot| slot.generation == identity.generation())
            .map(|slot| &slot.state)
            .filter(|state| !matches!(state, SlotState::Vacant))
    }

    fn slot_mut(&mut self, identity: Handle) -> Option<&mut SlotState> {
        self.slots
            .get_mut(identity.slot() as usize)
            .filter(|slot| slot.generation == identity.generation())
            .map(|slot| &mut slot.state)
            .filter(|state| !matches!(state, SlotState::Vacant))
    }

    fn live(&self, identity: Handle) -> Option<&FieldState> {
        match self.slot(identity) {
            Some(SlotState::Live(state)) => Some(state),
            _ => None,
        }
    }

    /// Vacate the slot. A slot whose generation would overflow is retired
    /// instead of recycled.
    fn release(&mut self, identity: Handle) {
        let Some(slot) = self.slots.get_mut(identity.slot() as usize) else {
            return;
        };
        if matches!(slot.state, SlotState::Live(_)) {
            self.live -= 1;
        }
        slot.state = SlotState::Vacant;
        if let Some(next) = slot.generation.checked_add(1) {
            slot.generation = next;
            self.free.push(identity.slot());
        }
    }

    fn lifecycle(&self, identity: Handle) -> Lifecycle {
        let Some(slot) = self.slots.get(identity.slot() as usize) else {
            return Lifecycle::Uninitialized;
        };
        if slot.generation > identity.generation() {
            return Lifecycle::Destroyed;
        }
        if slot.generation < identity.generation() {
            return Lifecycle::Uninitialized;
        }
        match slot.state {
            SlotState::Vacant => Lifecycle::Destroyed,
            SlotState::Constructing => Lifecycle::Constructing,
            SlotState::Live(_) => Lifecycle::Initialized,
        }
    }
}

fn next_index(len: usize) -> Option<u32> {
    u32::try_from(len).ok()
}

#[derive(Debug)]
struct Inner {
    table: RwLock<Arena>,
    settings: StoreSettings,
}

/// Shared handle to one state store. Clones refer to the same table.
#[derive(Debug, Clone)]
pub struct StateStore {
    inner: Arc<Inner>,
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StateStore {
    #[must_use]
    pub fn new() -> Self {
        Self::with_settings(StoreSettings::default())
    }

    #[must_use]
    pub fn with_settings(settings: StoreSettings) -> Self {
        Self {
            inner: Arc::new(Inner {
                table: RwLock::new(Arena::with_capacity(settings.initial_capacity())),
                settings,
            }),
        }
    }

    #[must_use]
    pub fn settings(&self) -> StoreSettings {
        self.inner.settings
    }

    /// Whether both handles share one table.
    #[must_use]
    pub fn same_store(&self, other: &StateStore) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    #[must_use]
    pub fn lifecycle(&self, identity: Handle) -> Lifecycle {
        self.read().lifecycle(identity)
    }

    /// Number of instances with registered field state.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.read().live
    }

    /// Issue a fresh identity in the `Constructing` state.
    pub(crate) fn reserve(&self) -> Result<Handle> {
        let identity = self.write().reserve().ok_or(FrostError::StoreExhausted)?;
        tracing::trace!(%identity, "Reserved identity");
        Ok(identity)
    }

    /// Register the full field mapping for a reserved identity.
    pub fn set(&self, caller: &CallerContext, identity: Handle, fields: FieldState) -> Result<()> {
        self.guard(caller, StoreOp::Set, identity)?;
        let mut table = self.write();
        let slot = table
            .slot_mut(identity)
            .ok_or(FrostError::NoContext { identity })?;
        if let SlotState::Live(existing) = &*slot {
            return Err(FrostError::AlreadyInitialized {
                type_name: existing.type_name().clone(),
                identity,
                field: None,
            });
        }
        tracing::debug!(
            %identity,
            type_name = %fields.type_name(),
            set = fields.set_count(),
            "Registered field state"
        );
        *slot = SlotState::Live(fields);
        table.live += 1;
        Ok(())
    }

    /// Fill one currently unset field of a live instance.
    pub fn set_field(
        &self,
        caller: &CallerContext,
        identity: Handle,
        field: &str,
        value: Value,
    ) -> Result<()> {
        self.guard(caller, StoreOp::SetField, identity)?;
        let mut table = self.write();
        let Some(SlotState::Live(state)) = table.slot_mut(identity) else {
            return Err(FrostError::NoContext { identity });
        };
        match state.set_once(field, value) {
            Ok(()) => {
                tracing::debug!(%identity, type_name = %state.type_name(), field, "Set field");
                Ok(())
            }
            Err(SetOnceError::Unknown) => Err(FrostError::UnknownField {
                type_name: state.type_name().clone(),
                field: field.to_owned(),
            }),
            Err(SetOnceError::AlreadySet) => Err(FrostError::AlreadyInitialized {
                type_name: state.type_name().clone(),
                identity,
                field: FieldName::new(field).ok(),
            }),
        }
    }

    /// Value copy of the field mapping.
    pub fn get(&self, caller: &CallerContext, identity: Handle) -> Result<FieldState> {
        self.guard(caller, StoreOp::Get, identity)?;
        self.read()
            .live(identity)
            .cloned()
            .ok_or(FrostError::NoContext { identity })
    }

    /// Run `f` on a copy of one field, without copying the whole mapping.
    ///
    /// The lock is released before `f` runs, so `f` may use the store.
    pub fn with_field<R>(
        &self,
        caller: &CallerContext,
        identity: Handle,
        field: &str,
        f: impl FnOnce(Option<&Value>) -> R,
    ) -> Result<R> {
        self.guard(caller, StoreOp::Get, identity)?;
        let value = {
            let table = self.read();
            let state = table
                .live(identity)
                .ok_or(FrostError::NoContext { identity })?;
            if !state.declares(field) {
                return Err(FrostError::UnknownField {
                    type_name: state.type_name().clone(),
                    field: field.to_owned(),
                });
            }
            state.get(field).cloned()
        };
        tracing::trace!(%identity, field, "Read field");
        Ok(f(value.as_ref()))
    }

    /// Remove the entry and free the slot. Absent entries are a no-op.
    pub fn destroy(&self, caller: &CallerContext, identity: Handle) -> Result<()> {
        self.guard(caller, StoreOp::Destroy, identity)?;
        let mut table = self.write();
        if table.slot(identity).is_some() {
            table.release(identity);
            tracing::debug!(%identity, "Destroyed field state");
        }
        Ok(())
    }

    /// Duplicate `source`'s mapping into the reserved `destination`.
    ///
    /// The caller's receiver must be the destination: the copy runs on the
    /// duplicate being initialized.
    pub fn copy(&self, caller: &CallerContext, source: Handle, destination: Handle) -> Result<()> {
        self.guard(caller, StoreOp::Copy, destination)?;
        let mut table = self.write();
        let fields = table
            .live(source)
            .cloned()
            .ok_or(FrostError::NoContext { identity: source })?;
        let slot = table.slot_mut(destination).ok_or(FrostError::NoContext {
            identity: destination,
        })?;
        if let SlotState::Live(existing) = &*slot {
            return Err(FrostError::AlreadyInitialized {
                type_name: existing.type_name().clone(),
                identity: destination,
                field: None,
            });
        }
        tracing::debug!(%source, %destination, type_name = %fields.type_name(), "Copied field state");
        *slot = SlotState::Live(fields);
        table.live += 1;
        Ok(())
    }

    /// Overwrite a stored field without any guard. Test back door only.
    #[cfg(feature = "test-support")]
    pub fn tamper(&self, identity: Handle, field: &str, value: Option<Value>) -> bool {
        match self.write().slot_mut(identity) {
            Some(SlotState::Live(state)) => state.force(field, value),
            _ => false,
        }
    }

    fn guard(&self, caller: &CallerContext, op: StoreOp, identity: Handle) -> Result<()> {
        let site = caller.site();
        let reason = if caller.receiver() != Some(identity) {
            Some(ScopeViolationReason::ForeignReceiver)
        } else if site == CallSite::BoundClosure {
            Some(ScopeViolationReason::BoundClosure)
        } else if site == CallSite::Introspection(Origin::Internal) {
            Some(ScopeViolationReason::InternalIntrospection)
        } else if !permits(op, site) {
            Some(ScopeViolationReason::ForbiddenSite { op, site })
        } else {
            None
        };
        match reason {
            None => Ok(()),
            Some(reason) => Err(audit::deny(
                self.inner.settings.audit(),
                FrostError::ScopeViolation { identity, reason },
            )),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Arena> {
        self.inner.table.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Arena> {
        self.inner
            .table
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Call sites allowed to reach each operation. Everything else is denied.
fn permits(op: StoreOp, site: CallSite) -> bool {
    match op {
        StoreOp::Set => matches!(site, CallSite::Constructor),
        StoreOp::SetField => matches!(site, CallSite::Constructor | CallSite::StaticFactory),
        StoreOp::Get => matches!(
            site,
            CallSite::Constructor
                | CallSite::StaticFactory
                | CallSite::InstanceMethod
                | CallSite::Introspection(Origin::External)
        ),
        StoreOp::Destroy => matches!(site, CallSite::Finalizer),
        StoreOp::Copy => matches!(site, CallSite::Duplicate),
    }
}
