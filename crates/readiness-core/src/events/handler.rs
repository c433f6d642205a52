//! ReconcileEventHandler trait, all methods with no-op defaults.

use super::types::*;

/// Trait for observing reconciliation cycles.
///
/// All methods have no-op default implementations, so handlers only need
/// to override the events they care about.
pub trait ReconcileEventHandler: Send + Sync {
    // ---- Cycle lifecycle ----
    fn on_cycle_started(&self, _event: &CycleStartedEvent) {}
    fn on_cycle_published(&self, _event: &CyclePublishedEvent) {}
    fn on_cycle_superseded(&self, _event: &CycleSupersededEvent) {}

    // ---- Degradation ----
    fn on_source_unavailable(&self, _event: &SourceUnavailableEvent) {}
    fn on_fallback_applied(&self, _event: &FallbackAppliedEvent) {}
    fn on_item_skipped(&self, _event: &ItemSkippedEvent) {}
}
