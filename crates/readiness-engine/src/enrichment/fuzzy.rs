//! Place-name matching against the coverage map.
//!
//! The upstream message names the place directly before a marker phrase
//! ("Blue Lagoon is missing evidence coverage"). The text before the first
//! marker found is taken as the place name and matched against POI names by
//! case-insensitive containment in either direction. This is a lossy
//! reverse-parse of prose; `KeyedEvidenceMatcher` is preferred whenever the
//! upstream supplies a place id.

use std::collections::BTreeSet;

use readiness_core::traits::EvidenceMatcher;
use readiness_core::types::{CoverageMap, EvidenceType, Finding};

#[derive(Debug, Clone)]
pub struct FuzzyPlaceMatcher {
    markers: Vec<String>,
}

impl FuzzyPlaceMatcher {
    pub fn new(markers: Vec<String>) -> Self {
        let markers = markers
            .into_iter()
            .filter(|m| !m.trim().is_empty())
            .collect();
        Self { markers }
    }

    /// Place name preceding the first marker phrase in `message`.
    pub fn place_name<'a>(&self, message: &'a str) -> Option<&'a str> {
        self.markers.iter().find_map(|marker| {
            let at = message.find(marker.as_str())?;
            let name = message[..at]
                .trim()
                .trim_end_matches([':', '：', ',', '，'])
                .trim();
            (!name.is_empty()).then_some(name)
        })
    }
}

impl EvidenceMatcher for FuzzyPlaceMatcher {
    fn missing_evidence(
        &self,
        finding: &Finding,
        coverage: &CoverageMap,
    ) -> Option<BTreeSet<EvidenceType>> {
        let place = self.place_name(&finding.message)?.to_lowercase();
        coverage
            .pois
            .iter()
            .filter(|poi| !poi.name.trim().is_empty())
            .find(|poi| {
                let name = poi.name.trim().to_lowercase();
                place.contains(&name) || name.contains(&place)
            })
            .map(|poi| poi.missing_evidence.iter().copied().collect::<BTreeSet<_>>())
            .filter(|types| !types.is_empty())
    }

    fn name(&self) -> &'static str {
        "fuzzy_place"
    }
}
