//! Trip gate derivation.
//!
//! ```text
//! blockers > 0                          → BLOCK
//! must > 0, or score < warn_below       → WARN
//! otherwise                             → PASS
//! ```
//! Counts decide first; the score can only push PASS to WARN.

use readiness_core::config::GateConfig;
use readiness_core::types::{GateStatus, LevelSummary};

/// Pure gate rule.
pub fn evaluate_gate(counts: &LevelSummary, score: Option<f64>, warn_below: f64) -> GateStatus {
    if counts.blockers > 0 {
        return GateStatus::Block;
    }
    let low_score = score.is_some_and(|s| s < warn_below);
    if counts.must > 0 || low_score {
        return GateStatus::Warn;
    }
    GateStatus::Pass
}

/// Gate verdict together with the counts it was evaluated against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GateVerdict {
    pub status: GateStatus,
    pub counts: LevelSummary,
}

/// Applies the gate rule with the configured threshold and count floor.
#[derive(Debug, Clone, Copy)]
pub struct GateEvaluator {
    warn_below_score: f64,
    summary_floor: bool,
}

impl GateEvaluator {
    pub fn new(config: &GateConfig) -> Self {
        Self {
            warn_below_score: config.effective_warn_below_score(),
            summary_floor: config.effective_summary_counts_floor(),
        }
    }

    /// Evaluate against the categorized counts, raised to the self-reported
    /// summaries of consulted sources when the floor is enabled.
    pub fn evaluate(
        &self,
        categorized: LevelSummary,
        summaries: &[LevelSummary],
        score: Option<f64>,
    ) -> GateVerdict {
        let counts = if self.summary_floor {
            summaries
                .iter()
                .fold(categorized, |acc, summary| acc.max(summary))
        } else {
            categorized
        };
        GateVerdict {
            status: evaluate_gate(&counts, score, self.warn_below_score),
            counts,
        }
    }
}

impl Default for GateEvaluator {
    fn default() -> Self {
        Self::new(&GateConfig::default())
    }
}
