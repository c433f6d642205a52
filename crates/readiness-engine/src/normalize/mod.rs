//! Finding normalization.
//!
//! Upstream JSON is parsed item by item into `RawFinding`, then each shape
//! has one total mapping into the canonical `Finding`. Items that cannot be
//! parsed at all are skipped and reported, never fatal.

pub mod fallback;
pub mod flat;
pub mod nested;
pub mod persona;

use std::collections::BTreeSet;

use readiness_core::types::{Finding, FindingLevel, RawFinding, RawFindingItem, Severity, SkippedItem};
use serde::Deserialize;
use serde_json::Value;
use smallvec::SmallVec;

use crate::gateway::SourceKind;

pub use fallback::{select_findings, FallbackReason, FindingSelection, SourceFindings};
pub use flat::{extract_flat, level_for_type, parse_score_breakdown};
pub use nested::extract_nested;
pub use persona::{extract_persona, parse_persona_alerts, to_persona_alert};

/// Category assigned to findings that do not name one.
pub const DEFAULT_CATEGORY: &str = "other";

/// Why a raw item was dropped.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ItemError {
    #[error("item is not a JSON object")]
    NotAnObject,

    #[error("item has no message")]
    MissingMessage,

    #[error("malformed item: {0}")]
    Malformed(String),

    #[error("unknown persona `{0}`")]
    UnknownPersona(String),
}

/// Raw items extracted from one source, plus the ones that were skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extracted {
    pub items: Vec<RawFinding>,
    pub skipped: Vec<SkippedItem>,
}

impl Extracted {
    pub(crate) fn skip(&mut self, source: SourceKind, index: usize, err: ItemError) {
        tracing::warn!(source = %source, index, reason = %err, "skipping malformed item");
        self.skipped.push(SkippedItem {
            source: source.as_str().to_string(),
            index,
            reason: err.to_string(),
        });
    }
}

/// Map one raw finding into canonical form.
///
/// Returns `None` for persona alerts, which are reconciled separately.
pub fn normalize(raw: RawFinding) -> Option<Finding> {
    match raw {
        RawFinding::Nested { bucket, item } => Some(finding_from_item(item, bucket)),
        RawFinding::Flat(item) => {
            let level = flat::flat_level(&item);
            Some(finding_from_item(item, level))
        }
        RawFinding::Persona(_) => None,
    }
}

/// Normalize a batch, preserving order.
pub fn normalize_all(raw: Vec<RawFinding>) -> Vec<Finding> {
    raw.into_iter().filter_map(normalize).collect()
}

/// Parse one finding item, rejecting anything without a usable message.
pub(crate) fn parse_item(value: &Value) -> Result<RawFindingItem, ItemError> {
    if !value.is_object() {
        return Err(ItemError::NotAnObject);
    }
    if value.get("message").map_or(true, Value::is_null) {
        return Err(ItemError::MissingMessage);
    }
    let item = RawFindingItem::deserialize(value).map_err(|e| ItemError::Malformed(e.to_string()))?;
    if item.message.trim().is_empty() {
        return Err(ItemError::MissingMessage);
    }
    Ok(item)
}

fn finding_from_item(item: RawFindingItem, level: FindingLevel) -> Finding {
    Finding {
        id: non_blank(item.id),
        title: non_blank(item.title),
        message: item.message,
        category: normalize_category(item.category.as_deref()),
        level,
        severity: item
            .severity
            .as_deref()
            .map(Severity::from_wire)
            .unwrap_or(Severity::Info),
        action_required: item
            .action_required
            .unwrap_or(matches!(level, FindingLevel::Blocker | FindingLevel::Must)),
        affected_days: item.affected_days.map(SmallVec::from_vec),
        missing_evidence_types: item
            .missing_evidence_types
            .map(|types| types.into_iter().collect::<BTreeSet<_>>())
            .filter(|types| !types.is_empty()),
        place_id: item.place_id,
    }
}

/// Trimmed, lowercased category; `"other"` when missing or blank.
pub fn normalize_category(category: Option<&str>) -> String {
    match category.map(str::trim) {
        Some(c) if !c.is_empty() => c.to_lowercase(),
        _ => DEFAULT_CATEGORY.to_string(),
    }
}

pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
