//! Fallback precedence between the check result and the score breakdown.
//!
//! Source 1 is the primary readiness check, or the legacy check when the
//! primary is absent. Source 2 is the score breakdown's flat findings. The
//! choice depends only on the contents of the two sources.

use std::fmt;

use readiness_core::types::{Finding, FindingSource, LevelSummary};

/// Normalized findings of one source with its self-reported counts.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFindings {
    pub origin: FindingSource,
    pub findings: Vec<Finding>,
    pub summary: LevelSummary,
}

impl SourceFindings {
    pub fn new(origin: FindingSource, findings: Vec<Finding>, summary: LevelSummary) -> Self {
        Self {
            origin,
            findings,
            summary,
        }
    }
}

/// Which precedence rule decided the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// Source 1 listed at least one finding.
    Source1HasFindings,
    /// Source 1 was empty and its counts were all zero.
    Source1TrustedEmpty,
    /// Source 1 was empty while reporting nonzero counts.
    Source1SelfInconsistent,
    /// Neither the primary nor the legacy check delivered.
    Source1Absent,
    /// No source delivered findings.
    NoSource,
}

impl FallbackReason {
    /// True when the findings were not taken from source 1.
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Source1SelfInconsistent | Self::Source1Absent)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Source1HasFindings => "check result has findings",
            Self::Source1TrustedEmpty => "check result is empty with zero counts",
            Self::Source1SelfInconsistent => "check result is empty but reports nonzero counts",
            Self::Source1Absent => "check result unavailable",
            Self::NoSource => "no finding source available",
        }
    }
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The finding list chosen for a cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct FindingSelection {
    pub origin: FindingSource,
    pub findings: Vec<Finding>,
    pub reason: FallbackReason,
}

/// Apply the precedence rules.
///
/// | source 1                         | result   |
/// |----------------------------------|----------|
/// | ≥1 finding                       | source 1 |
/// | empty, counts all zero           | source 1 |
/// | empty, any count nonzero         | source 2 |
/// | absent                           | source 2 |
///
/// When source 2 is needed but absent the selection is empty with origin
/// `None`; the gate still sees the self-reported counts.
pub fn select_findings(
    source1: Option<SourceFindings>,
    source2: Option<SourceFindings>,
) -> FindingSelection {
    let reason = match &source1 {
        Some(s1) if !s1.findings.is_empty() => FallbackReason::Source1HasFindings,
        Some(s1) if s1.summary.is_zero() => FallbackReason::Source1TrustedEmpty,
        Some(_) => FallbackReason::Source1SelfInconsistent,
        None if source2.is_some() => FallbackReason::Source1Absent,
        None => FallbackReason::NoSource,
    };

    let chosen = if reason.is_fallback() { source2 } else { source1 };
    match chosen {
        Some(source) => FindingSelection {
            origin: source.origin,
            findings: source.findings,
            reason,
        },
        None => FindingSelection {
            origin: FindingSource::None,
            findings: Vec::new(),
            reason,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use readiness_core::types::FindingLevel;

    fn finding(msg: &str) -> Finding {
        Finding::new(msg, "evidence", FindingLevel::Must)
    }

    fn primary(findings: Vec<Finding>, summary: LevelSummary) -> Option<SourceFindings> {
        Some(SourceFindings::new(FindingSource::Primary, findings, summary))
    }

    fn breakdown(findings: Vec<Finding>) -> Option<SourceFindings> {
        Some(SourceFindings::new(
            FindingSource::ScoreBreakdown,
            findings,
            LevelSummary::default(),
        ))
    }

    #[test]
    fn source1_with_findings_wins() {
        let sel = select_findings(
            primary(vec![finding("p")], LevelSummary::new(0, 1, 0, 0)),
            breakdown(vec![finding("s")]),
        );
        assert_eq!(sel.origin, FindingSource::Primary);
        assert_eq!(sel.findings[0].message, "p");
        assert!(!sel.reason.is_fallback());
    }

    #[test]
    fn trusted_empty_source1_is_kept() {
        let sel = select_findings(
            primary(vec![], LevelSummary::default()),
            breakdown(vec![finding("s")]),
        );
        assert_eq!(sel.origin, FindingSource::Primary);
        assert!(sel.findings.is_empty());
        assert_eq!(sel.reason, FallbackReason::Source1TrustedEmpty);
    }

    #[test]
    fn self_inconsistent_source1_falls_back() {
        let sel = select_findings(
            primary(vec![], LevelSummary::new(2, 0, 0, 0)),
            breakdown(vec![finding("f1"), finding("f2")]),
        );
        assert_eq!(sel.origin, FindingSource::ScoreBreakdown);
        let messages: Vec<_> = sel.findings.iter().map(|f| f.message.as_str()).collect();
        assert_eq!(messages, vec!["f1", "f2"]);
        assert_eq!(sel.reason, FallbackReason::Source1SelfInconsistent);
    }

    #[test]
    fn self_inconsistent_without_source2_is_empty() {
        let sel = select_findings(primary(vec![], LevelSummary::new(0, 3, 0, 0)), None);
        assert_eq!(sel.origin, FindingSource::None);
        assert!(sel.findings.is_empty());
        assert_eq!(sel.reason, FallbackReason::Source1SelfInconsistent);
    }

    #[test]
    fn absent_source1_uses_source2() {
        let sel = select_findings(None, breakdown(vec![finding("s")]));
        assert_eq!(sel.origin, FindingSource::ScoreBreakdown);
        assert_eq!(sel.reason, FallbackReason::Source1Absent);

        let none = select_findings(None, None);
        assert_eq!(none.origin, FindingSource::None);
        assert_eq!(none.reason, FallbackReason::NoSource);
    }

    #[test]
    fn legacy_origin_is_preserved() {
        let legacy = Some(SourceFindings::new(
            FindingSource::Legacy,
            vec![finding("l")],
            LevelSummary::default(),
        ));
        let sel = select_findings(legacy, breakdown(vec![]));
        assert_eq!(sel.origin, FindingSource::Legacy);
    }
}
