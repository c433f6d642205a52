use criterion::{criterion_group, criterion_main, Criterion};
use serde_json::{json, Value};

use readiness_core::config::ReadinessConfig;
use readiness_core::errors::SourceError;
use readiness_core::types::{CoverageMap, CoveragePoi, EvidenceType, TripRecord};
use readiness_engine::dedup::dedup;
use readiness_engine::enrichment::matcher_for;
use readiness_engine::gateway::SourceOutcome;
use readiness_engine::{reconcile, SourceSnapshot};

const CATEGORIES: [&str; 5] = ["entry", "schedule", "safety", "transport", "evidence"];
const LEVELS: [&str; 4] = ["blockers", "must", "should", "optional"];

/// Nested check payload with `n` findings, a tenth of them repeated.
fn check_payload(n: usize) -> Value {
    let mut groups = Vec::new();
    for chunk in 0..n / 20 {
        let mut group = serde_json::Map::new();
        for (li, level) in LEVELS.iter().enumerate() {
            let items: Vec<Value> = (0..5)
                .map(|k| {
                    let i = chunk * 20 + li * 5 + k;
                    let id = if i % 10 == 0 { 0 } else { i };
                    json!({
                        "id": format!("f{id}"),
                        "message": format!("Place {} is missing evidence coverage", i % 50),
                        "category": CATEGORIES[i % CATEGORIES.len()],
                    })
                })
                .collect();
            group.insert(level.to_string(), Value::Array(items));
        }
        groups.push(Value::Object(group));
    }
    json!({ "findings": groups, "summary": {"totalBlockers": n / 4} })
}

fn persona_alerts(n: usize) -> Vec<Value> {
    (0..n)
        .map(|i| {
            json!({
                "id": format!("a{}", i % (n / 2).max(1)),
                "persona": ["ABU", "DR_DRE", "NEPTUNE"][i % 3],
                "title": format!("Alert {i}"),
                "message": "details",
                "severity": if i % 4 == 0 { "warning" } else { "info" },
                "metadata": {"decisionSource": "PHYSICAL"}
            })
        })
        .collect()
}

fn build_snapshot(findings: usize) -> SourceSnapshot {
    let trip = TripRecord {
        id: "bench".to_string(),
        destination: Some("IS".to_string()),
        start_date: None,
        end_date: None,
    };
    let mut snap = SourceSnapshot::unavailable(trip, SourceError::Timeout { timeout_ms: 8_000 });
    snap.readiness_check =
        SourceOutcome::Available(serde_json::from_value(check_payload(findings)).unwrap());
    snap.score_breakdown =
        SourceOutcome::Available(serde_json::from_value(json!({"overallScore": 64})).unwrap());
    snap.persona_alerts = SourceOutcome::Available(persona_alerts(findings / 2));
    snap.coverage_map = SourceOutcome::Available(CoverageMap {
        pois: (0..50)
            .map(|i| CoveragePoi {
                place_id: None,
                name: format!("Place {i}"),
                missing_evidence: vec![EvidenceType::OpeningHours, EvidenceType::Weather],
            })
            .collect(),
        evidence_status_summary: None,
    });
    snap
}

fn bench_reconcile(c: &mut Criterion) {
    let config = ReadinessConfig::default();
    let matcher = matcher_for(&config.enrichment);
    for size in [100, 1_000] {
        let snap = build_snapshot(size);
        c.bench_function(&format!("reconcile_{size}_findings"), |b| {
            b.iter(|| reconcile(&snap, &config, matcher.as_ref()));
        });
    }
}

fn bench_dedup(c: &mut Criterion) {
    let snap = build_snapshot(1_000);
    let config = ReadinessConfig::default();
    let matcher = matcher_for(&config.enrichment);
    let findings: Vec<_> = reconcile(&snap, &config, matcher.as_ref())
        .categorized_findings
        .iter()
        .cloned()
        .collect();
    let doubled: Vec<_> = findings.iter().chain(findings.iter()).cloned().collect();

    c.bench_function("dedup_2x_findings", |b| {
        b.iter(|| dedup(doubled.clone()));
    });
}

criterion_group!(benches, bench_reconcile, bench_dedup);
criterion_main!(benches);
