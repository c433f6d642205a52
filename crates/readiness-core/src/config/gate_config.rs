//! Gate evaluation configuration.

use serde::{Deserialize, Serialize};

/// Configuration for trip-wide gate derivation.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GateConfig {
    /// Scores strictly below this value push Pass to Warn. Default: 60.
    pub warn_below_score: Option<f64>,
    /// Use self-reported summary counts as a floor under the categorized
    /// counts. Default: true.
    pub summary_counts_floor: Option<bool>,
}

impl GateConfig {
    pub fn effective_warn_below_score(&self) -> f64 {
        self.warn_below_score.unwrap_or(60.0)
    }

    pub fn effective_summary_counts_floor(&self) -> bool {
        self.summary_counts_floor.unwrap_or(true)
    }
}
