//! # readiness-core
//!
//! Foundation crate for the trip readiness reconciliation engine.
//! Defines the canonical types, errors, configuration, events, tracing setup,
//! and the traits the engine is built against. No I/O happens here.

pub mod config;
pub mod errors;
pub mod events;
pub mod tracing;
pub mod traits;
pub mod types;

pub use config::ReadinessConfig;
pub use errors::{ConfigError, ReadinessErrorCode, ReconcileError, SourceError};
pub use types::*;
