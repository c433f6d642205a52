//! Canonical types shared by every stage of the reconciliation pipeline.

pub mod finding;
pub mod gate;
mod lenient;
pub mod persona;
pub mod raw;
pub mod result;
pub mod sources;

pub use finding::{EvidenceType, Finding, FindingLevel, Severity};
pub use gate::{GateStatus, LevelSummary, SafetyGate, ScoreBreakdown};
pub use persona::{Persona, PersonaAlert, ACTION_KEY, DECISION_SOURCE_KEY};
pub use raw::{RawFinding, RawFindingItem, RawPersonaAlert};
pub use result::{
    AlertGroup, CategorizedFindings, DataState, Diagnostics, FindingSource, LevelBuckets,
    PersonaAlertGroups, ReconciliationResult, RiskDigest, SkippedItem, UnavailableSource,
};
pub use sources::{
    CoverageMap, CoveragePoi, EvidenceStatusSummary, FindingMarkers, MarkerSet, RiskItem,
    RiskSeverity, RiskSummary, RiskWarnings, TripRecord,
};
