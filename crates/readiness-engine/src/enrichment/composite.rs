//! Ordered chain of matchers.

use std::collections::BTreeSet;

use readiness_core::traits::EvidenceMatcher;
use readiness_core::types::{CoverageMap, EvidenceType, Finding};

/// Tries each matcher in order and returns the first match.
#[derive(Default)]
pub struct CompositeMatcher {
    matchers: Vec<Box<dyn EvidenceMatcher>>,
}

impl CompositeMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, matcher: impl EvidenceMatcher + 'static) -> Self {
        self.matchers.push(Box::new(matcher));
        self
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}

impl std::fmt::Debug for CompositeMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<_> = self.matchers.iter().map(|m| m.name()).collect();
        f.debug_struct("CompositeMatcher").field("matchers", &names).finish()
    }
}

impl EvidenceMatcher for CompositeMatcher {
    fn missing_evidence(
        &self,
        finding: &Finding,
        coverage: &CoverageMap,
    ) -> Option<BTreeSet<EvidenceType>> {
        self.matchers
            .iter()
            .find_map(|m| m.missing_evidence(finding, coverage))
    }

    fn name(&self) -> &'static str {
        "composite"
    }
}
