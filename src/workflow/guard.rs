//! In-flight flags that reset themselves.
//!
//! Guards release on drop, so an early return, an error, or a dropped future
//! all clear the flag they set.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::state::{StateEvent, StateStore};

/// Held while a transaction submission runs.
pub(crate) struct SubmissionGuard<'a> {
    flag: &'a AtomicBool,
    store: &'a StateStore,
}

impl<'a> SubmissionGuard<'a> {
    /// Claim the submission slot, or `None` if one is already held.
    pub(crate) fn acquire(flag: &'a AtomicBool, store: &'a StateStore) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        store.apply(StateEvent::SubmissionStarted);
        Some(Self { flag, store })
    }
}

impl Drop for SubmissionGuard<'_> {
    fn drop(&mut self) {
        self.store.apply(StateEvent::SubmissionFinished);
        self.flag.store(false, Ordering::Release);
    }
}

/// Held while a mining request runs.
pub(crate) struct MiningGuard<'a> {
    store: &'a StateStore,
}

impl<'a> MiningGuard<'a> {
    pub(crate) fn enter(store: &'a StateStore) -> Self {
        store.apply(StateEvent::MiningStarted);
        Self { store }
    }
}

impl Drop for MiningGuard<'_> {
    fn drop(&mut self) {
        self.store.apply(StateEvent::MiningFinished);
    }
}
