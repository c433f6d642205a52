//! Evidence enrichment configuration.

use serde::{Deserialize, Serialize};

/// Marker phrases the upstream places directly after a place name when it
/// reports missing evidence coverage.
const DEFAULT_PLACE_MARKERS: &[&str] = &[
    "缺少证据覆盖",
    "is missing evidence coverage",
    "missing evidence coverage",
];

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EnrichmentConfig {
    /// Fill `missing_evidence_types` from the coverage map. Default: true.
    pub enabled: Option<bool>,
    /// Fall back to place-name matching when no place id joins. Default: true.
    pub fuzzy_matching: Option<bool>,
    /// Override the default place-name marker phrases.
    #[serde(default)]
    pub place_markers: Vec<String>,
}

impl EnrichmentConfig {
    pub fn effective_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }

    pub fn effective_fuzzy_matching(&self) -> bool {
        self.fuzzy_matching.unwrap_or(true)
    }

    pub fn effective_place_markers(&self) -> Vec<String> {
        if self.place_markers.is_empty() {
            DEFAULT_PLACE_MARKERS.iter().map(|s| s.to_string()).collect()
        } else {
            self.place_markers.clone()
        }
    }
}
