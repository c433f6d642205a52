//! The immutable per-cycle reconciliation output.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::finding::{Finding, FindingLevel, Severity};
use super::gate::{GateStatus, LevelSummary, SafetyGate};
use super::persona::{Persona, PersonaAlert};
use super::sources::{EvidenceStatusSummary, MarkerSet, RiskItem, RiskSummary};

/// Whether any readiness data reached the engine this cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataState {
    /// Primary, legacy, and score-breakdown sources were all unavailable.
    NoData,
    Evaluated,
}

/// Which source the finding list was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingSource {
    Primary,
    Legacy,
    ScoreBreakdown,
    None,
}

/// The four ordered level lists of one category.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LevelBuckets {
    pub blockers: Vec<Finding>,
    pub must: Vec<Finding>,
    pub should: Vec<Finding>,
    pub optional: Vec<Finding>,
}

impl LevelBuckets {
    pub fn bucket(&self, level: FindingLevel) -> &[Finding] {
        match level {
            FindingLevel::Blocker => &self.blockers,
            FindingLevel::Must => &self.must,
            FindingLevel::Should => &self.should,
            FindingLevel::Optional => &self.optional,
        }
    }

    pub fn bucket_mut(&mut self, level: FindingLevel) -> &mut Vec<Finding> {
        match level {
            FindingLevel::Blocker => &mut self.blockers,
            FindingLevel::Must => &mut self.must,
            FindingLevel::Should => &mut self.should,
            FindingLevel::Optional => &mut self.optional,
        }
    }

    pub fn len(&self) -> usize {
        self.blockers.len() + self.must.len() + self.should.len() + self.optional.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Findings bucketed by category, then by level.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CategorizedFindings {
    /// Category name to its level buckets, in sorted category order.
    pub categories: BTreeMap<String, LevelBuckets>,
    /// Every blocker, category-agnostic, in input order. Rendered first.
    pub blockers: Vec<Finding>,
}

impl CategorizedFindings {
    /// Per-level counts across all categories.
    pub fn counts(&self) -> LevelSummary {
        let mut summary = LevelSummary::default();
        for buckets in self.categories.values() {
            summary.blockers += buckets.blockers.len() as u32;
            summary.must += buckets.must.len() as u32;
            summary.should += buckets.should.len() as u32;
            summary.optional += buckets.optional.len() as u32;
        }
        summary
    }

    pub fn len(&self) -> usize {
        self.categories.values().map(LevelBuckets::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate findings in category-then-level-then-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Finding> {
        self.categories.values().flat_map(|b| {
            FindingLevel::all()
                .iter()
                .flat_map(move |level| b.bucket(*level).iter())
        })
    }
}

/// A rolled-up group of persona alerts.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AlertGroup {
    pub alerts: Vec<PersonaAlert>,
    /// Worst severity in the group. `None` for an empty group.
    pub worst_severity: Option<Severity>,
    /// True when any alert carries `action = Reject`.
    pub hard_block: bool,
}

/// Persona alerts grouped for the consumers that read them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaAlertGroups {
    pub by_persona: BTreeMap<Persona, AlertGroup>,
    /// Safety alerts further grouped by `metadata.decisionSource`.
    pub safety_by_decision_source: BTreeMap<String, AlertGroup>,
    pub safety_gate: SafetyGate,
}

impl Default for PersonaAlertGroups {
    fn default() -> Self {
        Self {
            by_persona: Persona::all()
                .iter()
                .map(|p| (*p, AlertGroup::default()))
                .collect(),
            safety_by_decision_source: BTreeMap::new(),
            safety_gate: SafetyGate::Allow,
        }
    }
}

impl PersonaAlertGroups {
    pub fn group(&self, persona: Persona) -> Option<&AlertGroup> {
        self.by_persona.get(&persona)
    }
}

/// Deduplicated risk warnings with a severity summary.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RiskDigest {
    pub risks: Vec<RiskItem>,
    pub summary: RiskSummary,
}

/// An optional source that did not deliver this cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnavailableSource {
    pub source: String,
    pub reason: String,
}

/// A raw upstream item dropped during normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedItem {
    pub source: String,
    /// Position of the item in its upstream list.
    pub index: usize,
    pub reason: String,
}

/// Non-fatal observations collected during a cycle.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Diagnostics {
    pub unavailable_sources: Vec<UnavailableSource>,
    /// Raw items that could not be parsed, or named an unknown persona.
    pub skipped_items: Vec<SkippedItem>,
    /// Findings collapsed as duplicates.
    pub duplicate_findings: u32,
    /// Persona alerts collapsed as duplicates.
    pub duplicate_alerts: u32,
    /// The primary source reported an empty list with nonzero counts.
    pub primary_self_inconsistent: bool,
    /// Why the finding list was taken from a secondary source, if it was.
    pub fallback_reason: Option<String>,
}

/// The single value handed to consumers for one reconciliation cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationResult {
    pub generation: u64,
    pub trip_id: String,
    pub data_state: DataState,
    /// `None` exactly when `data_state` is `NoData`.
    pub gate_status: Option<GateStatus>,
    pub finding_source: FindingSource,
    pub overall_score: Option<f64>,
    /// Counts the gate was evaluated against.
    pub level_counts: LevelSummary,
    pub blockers: Vec<Finding>,
    pub categorized_findings: CategorizedFindings,
    pub persona_alerts: PersonaAlertGroups,
    pub risks: Option<RiskDigest>,
    pub evidence_status: Option<EvidenceStatusSummary>,
    /// Display-only marker flags keyed by finding id.
    pub markers: BTreeMap<String, MarkerSet>,
    pub diagnostics: Diagnostics,
}

impl ReconciliationResult {
    pub fn has_data(&self) -> bool {
        self.data_state == DataState::Evaluated
    }
}
