//! Caller contexts presented to the state store.
//!
//! A context names the receiver the calling code runs on and the kind of code
//! it is. Contexts with a receiver are minted only inside this crate, by the
//! enforcement layer, at the moment it runs on behalf of an instance. Code
//! outside the crate can only build [`CallerContext::external`], which the
//! store rejects for every operation.
//!
//! ```compile_fail
//! use std::num::NonZeroU32;
//! use frost_core::CallerContext;
//! use frost_types::{CallSite, Handle};
//!
//! let forged = CallerContext::for_instance(Handle::new(0, NonZeroU32::MIN), CallSite::Constructor);
//! ```

use frost_types::{CallSite, Handle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallerContext {
    receiver: Option<Handle>,
    site: CallSite,
}

impl CallerContext {
    /// Context for code with no receiver at all.
    #[must_use]
    pub fn external() -> Self {
        Self {
            receiver: None,
            site: CallSite::External,
        }
    }

    pub(crate) fn for_instance(receiver: Handle, site: CallSite) -> Self {
        Self {
            receiver: Some(receiver),
            site,
        }
    }

    #[must_use]
    pub fn receiver(&self) -> Option<Handle> {
        self.receiver
    }

    #[must_use]
    pub fn site(&self) -> CallSite {
        self.site
    }
}
