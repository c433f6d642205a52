//! Gate status, level counts, and the score breakdown signal.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::raw::RawFinding;

/// The trip-wide readiness verdict.
///
/// Variants are declared least-severe first so the derived `Ord` gives
/// `Block > Warn > Pass`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GateStatus {
    Pass,
    Warn,
    Block,
}

impl GateStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::Warn => "WARN",
            Self::Block => "BLOCK",
        }
    }
}

impl fmt::Display for GateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Safety-persona tri-state. Scoped to the Safety persona only and never
/// folded into `GateStatus`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SafetyGate {
    Allow,
    Warn,
    Block,
}

/// Per-level counts. Accepts both the readiness-check field names
/// (`totalBlockers`) and the score-breakdown names (`warnings`, `suggestions`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelSummary {
    #[serde(alias = "totalBlockers")]
    pub blockers: u32,
    #[serde(alias = "totalMust", alias = "warnings")]
    pub must: u32,
    #[serde(alias = "totalShould", alias = "suggestions")]
    pub should: u32,
    #[serde(alias = "totalOptional")]
    pub optional: u32,
}

impl LevelSummary {
    pub fn new(blockers: u32, must: u32, should: u32, optional: u32) -> Self {
        Self {
            blockers,
            must,
            should,
            optional,
        }
    }

    pub fn total(&self) -> u32 {
        self.blockers + self.must + self.should + self.optional
    }

    /// True when every count is zero.
    pub fn is_zero(&self) -> bool {
        self.total() == 0
    }

    /// Element-wise maximum of two summaries.
    pub fn max(&self, other: &LevelSummary) -> LevelSummary {
        LevelSummary {
            blockers: self.blockers.max(other.blockers),
            must: self.must.max(other.must),
            should: self.should.max(other.should),
            optional: self.optional.max(other.optional),
        }
    }
}

/// Secondary, coarser-grained readiness signal.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScoreBreakdown {
    /// Overall score in `[0, 100]`, when the upstream reported one.
    pub overall_score: Option<f64>,
    pub summary: LevelSummary,
    /// Flat-shape findings, used only as a fallback source.
    pub findings: Vec<RawFinding>,
}

impl ScoreBreakdown {
    /// Clamp a reported score into `[0, 100]`, discarding non-finite values.
    pub fn clamp_score(score: f64) -> Option<f64> {
        if score.is_finite() {
            Some(score.clamp(0.0, 100.0))
        } else {
            None
        }
    }
}
