//! Tests for the canonical readiness types and their wire decoding.

use readiness_core::errors::{ReadinessErrorCode, ReconcileError, SourceError};
use readiness_core::types::*;
use serde_json::json;

#[test]
fn test_gate_status_total_order() {
    assert!(GateStatus::Block > GateStatus::Warn);
    assert!(GateStatus::Warn > GateStatus::Pass);
    assert_eq!(serde_json::to_value(GateStatus::Block).unwrap(), json!("BLOCK"));
}

#[test]
fn test_severity_rollup_rank() {
    assert_eq!(Severity::Success.worst(Severity::Info), Severity::Info);
    assert_eq!(Severity::Info.worst(Severity::Warning), Severity::Warning);
    assert_eq!(Severity::Warning.worst(Severity::Success), Severity::Warning);
    assert_eq!(Severity::from_wire("HIGH"), Severity::Warning);
    assert_eq!(Severity::from_wire("ok"), Severity::Success);
    assert_eq!(Severity::from_wire("whatever"), Severity::Info);
}

#[test]
fn test_level_parse_accepts_bucket_names() {
    assert_eq!(FindingLevel::parse("blockers"), Some(FindingLevel::Blocker));
    assert_eq!(FindingLevel::parse(" Must "), Some(FindingLevel::Must));
    assert_eq!(FindingLevel::parse("warning"), None);
}

#[test]
fn test_persona_wire_names() {
    assert_eq!(Persona::from_wire("ABU"), Some(Persona::Safety));
    assert_eq!(Persona::from_wire("dr_dre"), Some(Persona::Pacing));
    assert_eq!(Persona::from_wire("Neptune"), Some(Persona::Repair));
    assert_eq!(Persona::from_wire("safety"), Some(Persona::Safety));
    assert_eq!(Persona::from_wire("ORACLE"), None);
    assert_eq!(Persona::Pacing.wire_name(), "DR_DRE");
}

#[test]
fn test_persona_alert_metadata_accessors() {
    let alert = PersonaAlert::new(Persona::Safety, "Road", "Closed", Severity::Warning)
        .with_metadata(DECISION_SOURCE_KEY, "PHYSICAL")
        .with_metadata(ACTION_KEY, "  ")
        .with_metadata("other", 3);
    assert_eq!(alert.decision_source(), Some("PHYSICAL"));
    assert_eq!(alert.action(), None);
}

#[test]
fn test_level_summary_aliases() {
    let from_check: LevelSummary =
        serde_json::from_value(json!({"totalBlockers": 2, "totalMust": 1})).unwrap();
    assert_eq!(from_check, LevelSummary::new(2, 1, 0, 0));

    let from_breakdown: LevelSummary =
        serde_json::from_value(json!({"blockers": 1, "warnings": 4, "suggestions": 2})).unwrap();
    assert_eq!(from_breakdown, LevelSummary::new(1, 4, 2, 0));
    assert_eq!(from_check.max(&from_breakdown), LevelSummary::new(2, 4, 2, 0));
    assert!(LevelSummary::default().is_zero());
}

#[test]
fn test_score_clamping() {
    assert_eq!(ScoreBreakdown::clamp_score(130.0), Some(100.0));
    assert_eq!(ScoreBreakdown::clamp_score(-4.0), Some(0.0));
    assert_eq!(ScoreBreakdown::clamp_score(f64::NAN), None);
}

#[test]
fn test_raw_item_place_id_accepts_numbers() {
    let item: RawFindingItem =
        serde_json::from_value(json!({"message": "m", "placeId": 42, "type": "blocker"})).unwrap();
    assert_eq!(item.place_id.as_deref(), Some("42"));
    assert_eq!(item.kind.as_deref(), Some("blocker"));

    let blank: RawFindingItem =
        serde_json::from_value(json!({"message": "m", "placeId": "  "})).unwrap();
    assert_eq!(blank.place_id, None);
}

#[test]
fn test_unknown_evidence_type_is_other() {
    let poi: CoveragePoi = serde_json::from_value(json!({
        "poiId": "p1",
        "name": "Lake",
        "missingEvidence": ["weather", "ferry_schedule"]
    }))
    .unwrap();
    assert_eq!(poi.missing_evidence, vec![EvidenceType::Weather, EvidenceType::Other]);
}

#[test]
fn test_marker_lookup() {
    let mut markers = FindingMarkers::default();
    markers.later.insert("f1".to_string());
    let set = markers.for_id("f1").unwrap();
    assert!(set.later && !set.checked);
    assert!(markers.for_id("f2").is_none());
}

#[test]
fn test_categorized_counts_and_iteration_order() {
    let mut categorized = CategorizedFindings::default();
    let b = Finding::new("b", "safety", FindingLevel::Blocker);
    let m = Finding::new("m", "evidence", FindingLevel::Must);
    let s = Finding::new("s", "evidence", FindingLevel::Should);
    categorized
        .categories
        .entry("safety".into())
        .or_default()
        .blockers
        .push(b.clone());
    let evidence = categorized.categories.entry("evidence".into()).or_default();
    evidence.should.push(s.clone());
    evidence.must.push(m.clone());

    assert_eq!(categorized.counts(), LevelSummary::new(1, 1, 1, 0));
    let order: Vec<&str> = categorized.iter().map(|f| f.message.as_str()).collect();
    assert_eq!(order, vec!["m", "s", "b"]);
}

#[test]
fn test_default_alert_groups_have_three_buckets() {
    let groups = PersonaAlertGroups::default();
    assert_eq!(groups.by_persona.len(), 3);
    assert_eq!(groups.safety_gate, SafetyGate::Allow);
    assert!(groups.group(Persona::Repair).unwrap().worst_severity.is_none());
}

#[test]
fn test_trip_load_error_classification() {
    let not_found = ReconcileError::from_trip_load(
        "t1",
        SourceError::Status { status: 404, body: String::new() },
    );
    assert_eq!(not_found.error_code(), "TRIP_NOT_FOUND");

    let forbidden = ReconcileError::from_trip_load(
        "t1",
        SourceError::Status { status: 403, body: String::new() },
    );
    assert_eq!(forbidden.error_code(), "UNAUTHORIZED");

    let down = ReconcileError::from_trip_load("t1", SourceError::Timeout { timeout_ms: 10 });
    assert_eq!(down.error_code(), "TRIP_UNAVAILABLE");
    assert!(down.coded_string().starts_with("[TRIP_UNAVAILABLE]"));
    assert_eq!(
        SourceError::Timeout { timeout_ms: 10 }.error_code(),
        "SOURCE_TIMEOUT"
    );
}

#[test]
fn test_rejected_trip_load_codes_are_classified() {
    let rejected = |code: &str| SourceError::Rejected {
        code: code.to_string(),
        message: "no".to_string(),
    };
    assert!(matches!(
        ReconcileError::from_trip_load("t1", rejected("NOT_FOUND")),
        ReconcileError::TripNotFound { .. }
    ));
    assert!(matches!(
        ReconcileError::from_trip_load("t1", rejected("trip_not_found")),
        ReconcileError::TripNotFound { .. }
    ));
    assert!(matches!(
        ReconcileError::from_trip_load("t1", rejected("FORBIDDEN_TRIP")),
        ReconcileError::Unauthorized { .. }
    ));
    assert!(matches!(
        ReconcileError::from_trip_load("t1", rejected("UNAUTHORIZED")),
        ReconcileError::Unauthorized { .. }
    ));
    assert!(matches!(
        ReconcileError::from_trip_load("t1", rejected("RATE_LIMITED")),
        ReconcileError::TripUnavailable { .. }
    ));
}

#[test]
fn test_coverage_map_keeps_pois_around_a_bad_one() {
    let map: CoverageMap = serde_json::from_value(json!({
        "pois": [
            {"name": "Blue Lagoon", "missingEvidenceTypes": ["opening_hours"]},
            {"placeId": 42, "missingEvidenceTypes": ["weather", 7]},
            "not a poi"
        ],
        "summary": {"total": 2, "missing": 2}
    }))
    .unwrap();
    assert_eq!(map.pois.len(), 2);
    assert_eq!(map.pois[0].missing_evidence, vec![EvidenceType::OpeningHours]);
    assert_eq!(map.pois[1].name, "");
    assert_eq!(map.pois[1].place_id.as_deref(), Some("42"));
    assert_eq!(map.pois[1].missing_evidence, vec![EvidenceType::Weather]);
    assert_eq!(map.evidence_status_summary.unwrap().missing, 2);
}

#[test]
fn test_risk_warnings_survive_incomplete_risks() {
    let warnings: RiskWarnings = serde_json::from_value(json!({
        "risks": [
            {"type": "weather", "severity": "high", "summary": "Storm"},
            {"type": "terrain", "summary": "Gravel roads"},
            {"type": "altitude", "severity": 3, "summary": "Pass"},
            null
        ]
    }))
    .unwrap();
    assert_eq!(warnings.risks.len(), 3);
    assert_eq!(warnings.risks[0].severity, RiskSeverity::High);
    assert_eq!(warnings.risks[1].severity, RiskSeverity::Unknown);
    assert_eq!(warnings.risks[2].severity, RiskSeverity::Unknown);
}
