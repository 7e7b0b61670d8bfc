use std::fmt;
use std::num::NonZeroU32;

/// Identity of an immutable instance inside a state store.
///
/// A handle is an arena slot plus the generation the slot had when the handle
/// was issued. Slots are recycled after destruction with a bumped generation,
/// so a stale handle never addresses a newer instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    slot: u32,
    generation: NonZeroU32,
}

impl Handle {
    #[must_use]
    pub const fn new(slot: u32, generation: NonZeroU32) -> Self {
        Self { slot, generation }
    }

    #[must_use]
    pub const fn slot(self) -> u32 {
        self.slot
    }

    #[must_use]
    pub const fn generation(self) -> NonZeroU32 {
        self.generation
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.slot, self.generation)
    }
}
