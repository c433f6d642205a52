//! The flat `findings[]` shape of the score breakdown.

use readiness_core::types::{FindingLevel, RawFinding, RawFindingItem, ScoreBreakdown};
use serde_json::Value;

use super::{parse_item, Extracted};
use crate::gateway::{ScoreBreakdownPayload, SourceKind};

/// Fixed mapping from the flat `type` discriminator to a level.
///
/// `blocker → Blocker`, `warning → Must`, `suggestion → Should`, canonical
/// level names map to themselves, and anything else is `Should`.
pub fn level_for_type(kind: &str) -> FindingLevel {
    match kind.trim().to_ascii_lowercase().as_str() {
        "blocker" | "blockers" => FindingLevel::Blocker,
        "warning" | "warnings" => FindingLevel::Must,
        "suggestion" | "suggestions" => FindingLevel::Should,
        "must" => FindingLevel::Must,
        "should" => FindingLevel::Should,
        "optional" => FindingLevel::Optional,
        _ => FindingLevel::Should,
    }
}

/// Level of a flat item: its `type`, else its `level`, else `Should`.
pub(crate) fn flat_level(item: &RawFindingItem) -> FindingLevel {
    item.kind
        .as_deref()
        .or(item.level.as_deref())
        .map(level_for_type)
        .unwrap_or(FindingLevel::Should)
}

/// Extract flat items in order.
pub fn extract_flat(source: SourceKind, items: &[Value]) -> Extracted {
    let mut out = Extracted::default();
    for (index, value) in items.iter().enumerate() {
        match parse_item(value) {
            Ok(item) => out.items.push(RawFinding::Flat(item)),
            Err(err) => out.skip(source, index, err),
        }
    }
    out
}

/// Turn a score breakdown payload into the canonical secondary signal.
/// The reported score is clamped into `[0, 100]`.
pub fn parse_score_breakdown(payload: &ScoreBreakdownPayload) -> (ScoreBreakdown, Extracted) {
    let extracted = extract_flat(SourceKind::ScoreBreakdown, &payload.findings);
    let breakdown = ScoreBreakdown {
        overall_score: payload.reported_score().and_then(ScoreBreakdown::clamp_score),
        summary: payload.summary.unwrap_or_default(),
        findings: extracted.items.clone(),
    };
    (breakdown, extracted)
}
