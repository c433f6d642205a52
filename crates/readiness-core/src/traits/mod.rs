//! Traits the engine is built against.

pub mod evidence_matcher;
pub mod generation;

pub use evidence_matcher::{EvidenceMatcher, NoEvidenceMatcher};
pub use generation::{CycleToken, GenerationCounter};
