//! # readiness-engine
//!
//! Collapses independent, unreliable readiness signals for a trip into one
//! gate status plus a deduplicated, categorized finding list.
//!
//! Data flows one way:
//! `SourceGateway → normalize → dedup → categorize → gate / alerts → ReconciliationResult`.

pub mod alerts;
pub mod categorize;
pub mod dedup;
pub mod engine;
pub mod enrichment;
pub mod gate;
pub mod gateway;
pub mod normalize;
pub mod risks;

pub use engine::{reconcile, CycleOutcome, CycleTrigger, ReconciliationEngine};
pub use gateway::{HttpBackend, ReadinessBackend, SourceGateway, SourceOutcome, SourceSnapshot};
