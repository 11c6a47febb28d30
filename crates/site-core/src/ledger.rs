//! Allocation accounting for GPU-side resources.
//!
//! The renderer registers every buffer and texture it creates and must
//! dispose each exactly once on teardown. Repeated mount/unmount cycles
//! without draining the ledger accumulate graphics memory, so teardown code
//! treats a non-drained ledger as a bug, not a warning.

use fnv::{FnvHashMap, FnvHashSet};
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ResourceId(u32);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("unknown resource id {0}")]
    Unknown(u32),
    #[error("resource id {0} disposed twice")]
    DoubleDispose(u32),
}

#[derive(Default)]
pub struct ResourceLedger {
    next: u32,
    live: FnvHashMap<u32, &'static str>,
    disposed: FnvHashSet<u32>,
}

impl ResourceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a freshly created resource under a debug label.
    pub fn alloc(&mut self, label: &'static str) -> ResourceId {
        let id = self.next;
        self.next += 1;
        self.live.insert(id, label);
        ResourceId(id)
    }

    /// Mark a resource released. Each id may be disposed exactly once.
    pub fn dispose(&mut self, id: ResourceId) -> Result<(), LedgerError> {
        if self.live.remove(&id.0).is_some() {
            self.disposed.insert(id.0);
            Ok(())
        } else if self.disposed.contains(&id.0) {
            Err(LedgerError::DoubleDispose(id.0))
        } else {
            Err(LedgerError::Unknown(id.0))
        }
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn disposed_count(&self) -> usize {
        self.disposed.len()
    }

    /// True when every allocation has been disposed.
    pub fn is_drained(&self) -> bool {
        self.live.is_empty()
    }

    /// Labels of resources still live; used in teardown diagnostics.
    pub fn outstanding(&self) -> Vec<&'static str> {
        self.live.values().copied().collect()
    }
}
