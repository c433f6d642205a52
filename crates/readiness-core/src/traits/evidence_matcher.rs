//! EvidenceMatcher trait.
//!
//! Joins a finding to the coverage map to recover which evidence kinds are
//! missing for the place it is about. Matching is best-effort: `None` means
//! "no match", never an error.

use std::collections::BTreeSet;

use crate::types::{CoverageMap, EvidenceType, Finding};

/// Strategy for looking up a finding's missing evidence in the coverage map.
pub trait EvidenceMatcher: Send + Sync {
    /// Missing evidence types for the place `finding` refers to, if any POI
    /// in `coverage` matches it.
    fn missing_evidence(
        &self,
        finding: &Finding,
        coverage: &CoverageMap,
    ) -> Option<BTreeSet<EvidenceType>>;

    /// Short name used in logs.
    fn name(&self) -> &'static str {
        "unnamed"
    }
}

/// Matcher that never matches. Used when enrichment is disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEvidenceMatcher;

impl EvidenceMatcher for NoEvidenceMatcher {
    fn missing_evidence(&self, _finding: &Finding, _coverage: &CoverageMap) -> Option<BTreeSet<EvidenceType>> {
        None
    }

    fn name(&self) -> &'static str {
        "none"
    }
}
