//! Risk warning digest.

use readiness_core::types::{RiskDigest, RiskItem, RiskSeverity, RiskSummary, RiskWarnings};
use rustc_hash::FxHashSet;
use serde::Deserialize;
use serde_json::Value;

use crate::gateway::SourceKind;
use crate::normalize::{Extracted, ItemError};

/// Parse the risk list embedded in a readiness check, skipping bad items.
pub fn parse_check_risks(source: SourceKind, items: &[Value]) -> (Vec<RiskItem>, Extracted) {
    let mut out = Extracted::default();
    let mut risks = Vec::with_capacity(items.len());
    for (index, value) in items.iter().enumerate() {
        if !value.is_object() {
            out.skip(source, index, ItemError::NotAnObject);
            continue;
        }
        match RiskItem::deserialize(value) {
            Ok(risk) => risks.push(risk),
            Err(e) => out.skip(source, index, ItemError::Malformed(e.to_string())),
        }
    }
    (risks, out)
}

/// Merge risk warnings with the check's own risks, dropping repeats of the
/// same `(type, summary)` pair. `None` when neither source delivered.
pub fn digest(warnings: Option<&RiskWarnings>, check_risks: Option<&[RiskItem]>) -> Option<RiskDigest> {
    if warnings.is_none() && check_risks.is_none() {
        return None;
    }

    let mut seen = FxHashSet::default();
    let risks: Vec<RiskItem> = warnings
        .map(|w| w.risks.as_slice())
        .unwrap_or_default()
        .iter()
        .chain(check_risks.unwrap_or_default())
        .filter(|risk| seen.insert(risk_key(risk)))
        .cloned()
        .collect();

    let mut summary = RiskSummary {
        total_risks: risks.len() as u32,
        ..Default::default()
    };
    for risk in &risks {
        match risk.severity {
            RiskSeverity::High => summary.high_severity += 1,
            RiskSeverity::Medium => summary.medium_severity += 1,
            RiskSeverity::Low => summary.low_severity += 1,
            RiskSeverity::Unknown => {}
        }
    }

    Some(RiskDigest { risks, summary })
}

fn risk_key(risk: &RiskItem) -> (String, String) {
    let text = if risk.summary.trim().is_empty() {
        risk.message.as_deref().unwrap_or_default()
    } else {
        risk.summary.as_str()
    };
    (risk.kind.to_ascii_lowercase(), text.trim().to_string())
}
