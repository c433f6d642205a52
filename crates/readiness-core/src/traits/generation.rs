//! Latest-wins cycle tokens.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Monotonic counter issuing one `CycleToken` per reconciliation cycle.
///
/// Clones share the same counter. A cycle may publish only while its token
/// is still the most recently issued one.
#[derive(Debug, Clone, Default)]
pub struct GenerationCounter {
    latest: Arc<AtomicU64>,
}

impl GenerationCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the token for a new cycle. Generations start at 1.
    pub fn issue(&self) -> CycleToken {
        let generation = self.latest.fetch_add(1, Ordering::AcqRel) + 1;
        CycleToken {
            generation,
            latest: Arc::clone(&self.latest),
        }
    }

    /// Most recently issued generation, 0 before the first cycle.
    pub fn current(&self) -> u64 {
        self.latest.load(Ordering::Acquire)
    }
}

/// Token held by one in-flight cycle.
#[derive(Debug, Clone)]
pub struct CycleToken {
    generation: u64,
    latest: Arc<AtomicU64>,
}

impl CycleToken {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True while no newer cycle has been issued.
    pub fn is_latest(&self) -> bool {
        self.latest.load(Ordering::Acquire) == self.generation
    }

    /// Generation of the newest issued cycle.
    pub fn latest_generation(&self) -> u64 {
        self.latest.load(Ordering::Acquire)
    }
}
