//! Best-effort evidence enrichment from the coverage map.

pub mod composite;
pub mod fuzzy;
pub mod keyed;

use std::sync::Arc;

use readiness_core::config::EnrichmentConfig;
use readiness_core::traits::{EvidenceMatcher, NoEvidenceMatcher};
use readiness_core::types::{CoverageMap, Finding};
use tracing::debug;

pub use composite::CompositeMatcher;
pub use fuzzy::FuzzyPlaceMatcher;
pub use keyed::KeyedEvidenceMatcher;

/// Matcher described by the enrichment config: keyed join first, then
/// place-name matching when enabled.
pub fn matcher_for(config: &EnrichmentConfig) -> Arc<dyn EvidenceMatcher> {
    if !config.effective_enabled() {
        return Arc::new(NoEvidenceMatcher);
    }
    let mut composite = CompositeMatcher::new().with(KeyedEvidenceMatcher);
    if config.effective_fuzzy_matching() {
        composite = composite.with(FuzzyPlaceMatcher::new(config.effective_place_markers()));
    }
    Arc::new(composite)
}

/// Fill `missing_evidence_types` where the source left it empty. Returns how
/// many findings were enriched. Values supplied by the source are kept.
pub fn enrich(findings: &mut [Finding], coverage: &CoverageMap, matcher: &dyn EvidenceMatcher) -> usize {
    if coverage.pois.is_empty() {
        return 0;
    }
    let mut enriched = 0;
    for finding in findings.iter_mut() {
        if finding.missing_evidence_types.is_some() {
            continue;
        }
        if let Some(types) = matcher.missing_evidence(finding, coverage) {
            finding.missing_evidence_types = Some(types);
            enriched += 1;
        }
    }
    debug!(matcher = matcher.name(), enriched, "evidence enrichment");
    enriched
}
