//! Parsed payloads of the auxiliary upstream sources.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::finding::EvidenceType;
use super::lenient;

/// The trip itself. Loading it is the one precondition of a cycle.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripRecord {
    pub id: String,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

/// Per-place evidence coverage.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageMap {
    /// POIs that fail to decode are dropped; the rest of the map survives.
    #[serde(default, deserialize_with = "lenient::lossy_vec")]
    pub pois: Vec<CoveragePoi>,
    #[serde(default, alias = "summary")]
    pub evidence_status_summary: Option<EvidenceStatusSummary>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoveragePoi {
    #[serde(default, alias = "poiId", deserialize_with = "lenient::string_or_number")]
    pub place_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub name: String,
    #[serde(default, alias = "missingEvidenceTypes", deserialize_with = "lenient::evidence_vec")]
    pub missing_evidence: Vec<EvidenceType>,
}

/// Evidence fetch progress across the whole trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EvidenceStatusSummary {
    pub total: u32,
    pub fetched: u32,
    pub fetching: u32,
    pub missing: u32,
    pub failed: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskSeverity {
    Low,
    Medium,
    High,
    #[default]
    #[serde(other)]
    Unknown,
}

/// One upstream risk warning (altitude, terrain, weather, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskItem {
    #[serde(default, rename = "type", deserialize_with = "lenient::or_default")]
    pub kind: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub severity: RiskSeverity,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub summary: String,
    #[serde(default, alias = "mitigation", deserialize_with = "lenient::lossy_vec")]
    pub mitigations: Vec<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::or_default"
    )]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RiskSummary {
    pub total_risks: u32,
    pub high_severity: u32,
    pub medium_severity: u32,
    pub low_severity: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskWarnings {
    #[serde(default)]
    pub trip_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::lossy_vec")]
    pub risks: Vec<RiskItem>,
    #[serde(default)]
    pub summary: Option<RiskSummary>,
}

/// Finding ids flagged in the external marker store.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FindingMarkers {
    pub checked: BTreeSet<String>,
    pub not_applicable: BTreeSet<String>,
    pub later: BTreeSet<String>,
}

impl FindingMarkers {
    /// Marker flags for one finding id. `None` when the id carries no marker.
    pub fn for_id(&self, id: &str) -> Option<MarkerSet> {
        let set = MarkerSet {
            checked: self.checked.contains(id),
            not_applicable: self.not_applicable.contains(id),
            later: self.later.contains(id),
        };
        (set.checked || set.not_applicable || set.later).then_some(set)
    }
}

/// Display-only marker flags joined onto a finding by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerSet {
    pub checked: bool,
    pub not_applicable: bool,
    pub later: bool,
}
