//! Exact join on `place_id`.

use std::collections::BTreeSet;

use readiness_core::traits::EvidenceMatcher;
use readiness_core::types::{CoverageMap, EvidenceType, Finding};

/// Joins a finding to the coverage POI carrying the same place id.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyedEvidenceMatcher;

impl EvidenceMatcher for KeyedEvidenceMatcher {
    fn missing_evidence(
        &self,
        finding: &Finding,
        coverage: &CoverageMap,
    ) -> Option<BTreeSet<EvidenceType>> {
        let place_id = finding.place_id.as_deref()?;
        coverage
            .pois
            .iter()
            .find(|poi| poi.place_id.as_deref() == Some(place_id))
            .map(|poi| poi.missing_evidence.iter().copied().collect::<BTreeSet<_>>())
            .filter(|types| !types.is_empty())
    }

    fn name(&self) -> &'static str {
        "keyed"
    }
}
