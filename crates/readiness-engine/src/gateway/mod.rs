//! Fan-out access to the upstream readiness sources.
//!
//! The trip record is the only precondition. Every other source settles to
//! `SourceOutcome` and degrades the result instead of failing the cycle.

pub mod backend;
pub mod http_backend;
pub mod protocol;
pub mod snapshot;
pub mod source_gateway;

pub use backend::{
    LegacyCheckRequest, ReadinessBackend, ReadinessCheckPayload, ScoreBreakdownPayload,
};
pub use http_backend::HttpBackend;
pub use snapshot::{SourceKind, SourceOutcome, SourceSnapshot};
pub use source_gateway::SourceGateway;
