//! Event payload types for reconciliation lifecycle events.

use crate::types::{FindingSource, GateStatus};

/// Payload for `on_cycle_started`.
#[derive(Debug, Clone)]
pub struct CycleStartedEvent {
    pub trip_id: String,
    pub generation: u64,
    pub trigger: &'static str,
}

/// Payload for `on_source_unavailable`.
#[derive(Debug, Clone)]
pub struct SourceUnavailableEvent {
    pub trip_id: String,
    pub source: String,
    pub reason: String,
}

/// Payload for `on_fallback_applied`.
#[derive(Debug, Clone)]
pub struct FallbackAppliedEvent {
    pub trip_id: String,
    pub used: FindingSource,
    pub reason: String,
}

/// Payload for `on_item_skipped`.
#[derive(Debug, Clone)]
pub struct ItemSkippedEvent {
    pub trip_id: String,
    pub source: String,
    pub reason: String,
}

/// Payload for `on_cycle_published`.
#[derive(Debug, Clone)]
pub struct CyclePublishedEvent {
    pub trip_id: String,
    pub generation: u64,
    pub gate_status: Option<GateStatus>,
    pub finding_count: usize,
    pub duration_ms: u64,
}

/// Payload for `on_cycle_superseded`.
#[derive(Debug, Clone)]
pub struct CycleSupersededEvent {
    pub trip_id: String,
    pub generation: u64,
    pub latest: u64,
}
