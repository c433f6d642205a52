//! EventDispatcher: synchronous event dispatch, free when empty.

use std::sync::Arc;

use super::handler::ReconcileEventHandler;
use super::types::*;

/// Synchronous event dispatcher wrapping a list of handlers.
#[derive(Default, Clone)]
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn ReconcileEventHandler>>,
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an event handler.
    pub fn register(&mut self, handler: Arc<dyn ReconcileEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Emit an event to all registered handlers.
    /// A panicking handler does not prevent later handlers from running.
    fn emit<F: Fn(&dyn ReconcileEventHandler)>(&self, f: F) {
        for handler in &self.handlers {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                f(handler.as_ref());
            }));
            if result.is_err() {
                tracing::error!("event handler panicked; continuing with remaining handlers");
            }
        }
    }

    pub fn emit_cycle_started(&self, event: &CycleStartedEvent) {
        self.emit(|h| h.on_cycle_started(event));
    }

    pub fn emit_cycle_published(&self, event: &CyclePublishedEvent) {
        self.emit(|h| h.on_cycle_published(event));
    }

    pub fn emit_cycle_superseded(&self, event: &CycleSupersededEvent) {
        self.emit(|h| h.on_cycle_superseded(event));
    }

    pub fn emit_source_unavailable(&self, event: &SourceUnavailableEvent) {
        self.emit(|h| h.on_source_unavailable(event));
    }

    pub fn emit_fallback_applied(&self, event: &FallbackAppliedEvent) {
        self.emit(|h| h.on_fallback_applied(event));
    }

    pub fn emit_item_skipped(&self, event: &ItemSkippedEvent) {
        self.emit(|h| h.on_item_skipped(event));
    }
}
