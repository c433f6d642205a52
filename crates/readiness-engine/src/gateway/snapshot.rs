//! Settled source results of one cycle.

use std::fmt;

use readiness_core::errors::SourceError;
use readiness_core::types::{CoverageMap, FindingMarkers, RiskWarnings, TripRecord, UnavailableSource};
use serde_json::Value;

use super::backend::{ReadinessCheckPayload, ScoreBreakdownPayload};

/// Upstream sources the gateway consults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Trip,
    ReadinessCheck,
    LegacyCheck,
    ScoreBreakdown,
    CoverageMap,
    RiskWarnings,
    PersonaAlerts,
    FindingMarkers,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trip => "trip",
            Self::ReadinessCheck => "readiness_check",
            Self::LegacyCheck => "legacy_check",
            Self::ScoreBreakdown => "score_breakdown",
            Self::CoverageMap => "coverage_map",
            Self::RiskWarnings => "risk_warnings",
            Self::PersonaAlerts => "persona_alerts",
            Self::FindingMarkers => "finding_markers",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A source that settled, successfully or not.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceOutcome<T> {
    Available(T),
    Unavailable(SourceError),
}

impl<T> SourceOutcome<T> {
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }

    pub fn available(&self) -> Option<&T> {
        match self {
            Self::Available(value) => Some(value),
            Self::Unavailable(_) => None,
        }
    }

    pub fn error(&self) -> Option<&SourceError> {
        match self {
            Self::Available(_) => None,
            Self::Unavailable(err) => Some(err),
        }
    }
}

impl<T> From<Result<T, SourceError>> for SourceOutcome<T> {
    fn from(result: Result<T, SourceError>) -> Self {
        match result {
            Ok(value) => Self::Available(value),
            Err(err) => Self::Unavailable(err),
        }
    }
}

/// Everything the gateway gathered for one trip.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceSnapshot {
    pub trip: TripRecord,
    pub readiness_check: SourceOutcome<ReadinessCheckPayload>,
    /// Attempted only when `readiness_check` is unavailable.
    pub legacy_check: Option<SourceOutcome<ReadinessCheckPayload>>,
    pub score_breakdown: SourceOutcome<ScoreBreakdownPayload>,
    pub coverage_map: SourceOutcome<CoverageMap>,
    pub risk_warnings: SourceOutcome<RiskWarnings>,
    pub persona_alerts: SourceOutcome<Vec<Value>>,
    pub finding_markers: SourceOutcome<FindingMarkers>,
}

impl SourceSnapshot {
    /// Snapshot where every optional source is unavailable with `err`.
    /// Starting point for tests and for callers that fill sources in.
    pub fn unavailable(trip: TripRecord, err: SourceError) -> Self {
        Self {
            trip,
            readiness_check: SourceOutcome::Unavailable(err.clone()),
            legacy_check: None,
            score_breakdown: SourceOutcome::Unavailable(err.clone()),
            coverage_map: SourceOutcome::Unavailable(err.clone()),
            risk_warnings: SourceOutcome::Unavailable(err.clone()),
            persona_alerts: SourceOutcome::Unavailable(err.clone()),
            finding_markers: SourceOutcome::Unavailable(err),
        }
    }

    /// The source-1 payload: primary when available, else the legacy check.
    pub fn check_payload(&self) -> Option<(SourceKind, &ReadinessCheckPayload)> {
        if let Some(primary) = self.readiness_check.available() {
            return Some((SourceKind::ReadinessCheck, primary));
        }
        self.legacy_check
            .as_ref()
            .and_then(SourceOutcome::available)
            .map(|legacy| (SourceKind::LegacyCheck, legacy))
    }

    /// Every optional source that did not deliver, in a fixed order.
    pub fn unavailable_sources(&self) -> Vec<UnavailableSource> {
        let errors = [
            (SourceKind::ReadinessCheck, self.readiness_check.error()),
            (
                SourceKind::LegacyCheck,
                self.legacy_check.as_ref().and_then(SourceOutcome::error),
            ),
            (SourceKind::ScoreBreakdown, self.score_breakdown.error()),
            (SourceKind::CoverageMap, self.coverage_map.error()),
            (SourceKind::RiskWarnings, self.risk_warnings.error()),
            (SourceKind::PersonaAlerts, self.persona_alerts.error()),
            (SourceKind::FindingMarkers, self.finding_markers.error()),
        ];
        errors
            .into_iter()
            .filter_map(|(kind, err)| {
                err.map(|e| UnavailableSource {
                    source: kind.as_str().to_string(),
                    reason: e.to_string(),
                })
            })
            .collect()
    }
}
