use proptest::prelude::*;
use readiness_core::types::{
    Finding, FindingLevel, FindingSource, LevelSummary, Persona, PersonaAlert, Severity,
};
use readiness_engine::alerts::worst_severity;
use readiness_engine::categorize::categorize;
use readiness_engine::dedup::dedup;
use readiness_engine::gate::{evaluate_gate, GateEvaluator};
use readiness_engine::normalize::{select_findings, SourceFindings};

fn level() -> impl Strategy<Value = FindingLevel> {
    prop_oneof![
        Just(FindingLevel::Blocker),
        Just(FindingLevel::Must),
        Just(FindingLevel::Should),
        Just(FindingLevel::Optional),
    ]
}

fn severity() -> impl Strategy<Value = Severity> {
    prop_oneof![
        Just(Severity::Info),
        Just(Severity::Warning),
        Just(Severity::Success),
    ]
}

// Small alphabets so that duplicates actually occur.
fn finding() -> impl Strategy<Value = Finding> {
    (
        proptest::option::of("[a-c]"),
        "[x-z]{1,2}",
        "(entry|schedule|safety)",
        level(),
    )
        .prop_map(|(id, message, category, level)| {
            let finding = Finding::new(message, category, level);
            match id {
                Some(id) => finding.with_id(id),
                None => finding,
            }
        })
}

fn summary() -> impl Strategy<Value = LevelSummary> {
    (0u32..3, 0u32..3, 0u32..3, 0u32..3).prop_map(|(b, m, s, o)| LevelSummary::new(b, m, s, o))
}

fn score() -> impl Strategy<Value = Option<f64>> {
    proptest::option::of(0.0f64..=100.0)
}

proptest! {
    #[test]
    fn dedup_is_idempotent(findings in prop::collection::vec(finding(), 0..24)) {
        let once = dedup(findings.clone());
        prop_assert_eq!(once.items.len() + once.duplicates as usize, findings.len());
        let twice = dedup(once.items.clone());
        prop_assert_eq!(twice.duplicates, 0);
        prop_assert_eq!(twice.items, once.items);
    }

    #[test]
    fn a_blocker_always_blocks(counts in summary(), score in score()) {
        let mut with_blocker = counts;
        with_blocker.blockers += 1;
        prop_assert_eq!(
            evaluate_gate(&with_blocker, score, 70.0),
            readiness_core::types::GateStatus::Block
        );
    }

    #[test]
    fn pass_requires_no_blockers_or_must(counts in summary(), score in score()) {
        let status = evaluate_gate(&counts, score, 70.0);
        if status == readiness_core::types::GateStatus::Pass {
            prop_assert_eq!(counts.blockers, 0);
            prop_assert_eq!(counts.must, 0);
            prop_assert!(score.map_or(true, |s| s >= 70.0));
        }
    }

    #[test]
    fn summary_floor_never_lowers_counts(
        findings in prop::collection::vec(finding(), 0..16),
        summaries in prop::collection::vec(summary(), 0..3),
    ) {
        let categorized = categorize(findings).counts();
        let verdict = GateEvaluator::default().evaluate(categorized, &summaries, None);
        prop_assert!(verdict.counts.blockers >= categorized.blockers);
        prop_assert!(verdict.counts.must >= categorized.must);
        for s in &summaries {
            prop_assert!(verdict.counts.blockers >= s.blockers);
        }
    }

    #[test]
    fn nonempty_primary_is_always_used(
        primary in prop::collection::vec(finding(), 1..8),
        secondary in prop::collection::vec(finding(), 0..8),
        counts in summary(),
    ) {
        let selection = select_findings(
            Some(SourceFindings::new(FindingSource::Primary, primary.clone(), counts)),
            Some(SourceFindings::new(FindingSource::ScoreBreakdown, secondary, LevelSummary::default())),
        );
        prop_assert_eq!(selection.origin, FindingSource::Primary);
        prop_assert_eq!(selection.findings, primary);
    }

    #[test]
    fn empty_primary_with_counts_falls_back(
        secondary in prop::collection::vec(finding(), 0..8),
        counts in summary().prop_filter("nonzero", |s| !s.is_zero()),
    ) {
        let selection = select_findings(
            Some(SourceFindings::new(FindingSource::Primary, Vec::new(), counts)),
            Some(SourceFindings::new(FindingSource::ScoreBreakdown, secondary.clone(), LevelSummary::default())),
        );
        prop_assert_eq!(selection.origin, FindingSource::ScoreBreakdown);
        prop_assert_eq!(selection.findings, secondary);
    }

    #[test]
    fn categorize_keeps_every_finding(findings in prop::collection::vec(finding(), 0..24)) {
        let expected_blockers = findings.iter().filter(|f| f.is_blocker()).count();
        let total = findings.len();
        let categorized = categorize(findings);
        prop_assert_eq!(categorized.len(), total);
        prop_assert_eq!(categorized.blockers.len(), expected_blockers);
        prop_assert_eq!(categorized.counts().blockers as usize, expected_blockers);
    }

    #[test]
    fn worst_severity_is_the_maximum_rank(severities in prop::collection::vec(severity(), 0..12)) {
        let alerts: Vec<PersonaAlert> = severities
            .iter()
            .map(|s| PersonaAlert::new(Persona::Pacing, "t", "m", *s))
            .collect();
        let worst = worst_severity(&alerts);
        prop_assert_eq!(worst.is_none(), alerts.is_empty());
        if let Some(worst) = worst {
            prop_assert!(severities.iter().all(|s| s.rank() <= worst.rank()));
            prop_assert!(severities.contains(&worst));
        }
    }
}
