//! Reconciliation cycles.
//!
//! `reconcile` is the pure pipeline from a settled `SourceSnapshot` to a
//! `ReconciliationResult`. `ReconciliationEngine` wraps it with the gateway
//! fan-out, latest-wins publication, and lifecycle events.

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Instant;

use readiness_core::config::ReadinessConfig;
use readiness_core::errors::ReconcileError;
use readiness_core::events::{
    CyclePublishedEvent, CycleStartedEvent, CycleSupersededEvent, EventDispatcher,
    FallbackAppliedEvent, ItemSkippedEvent, ReconcileEventHandler, SourceUnavailableEvent,
};
use readiness_core::traits::{CycleToken, EvidenceMatcher, GenerationCounter};
use readiness_core::types::{
    DataState, Diagnostics, FindingSource, MarkerSet, ReconciliationResult, SkippedItem,
};
use tracing::{debug, info, warn};

use crate::alerts::AlertReconciler;
use crate::categorize::categorize;
use crate::dedup::dedup;
use crate::enrichment::{enrich, matcher_for};
use crate::gate::GateEvaluator;
use crate::gateway::{ReadinessBackend, SourceGateway, SourceKind, SourceSnapshot};
use crate::normalize::{
    extract_nested, normalize_all, parse_persona_alerts, parse_score_breakdown, select_findings,
    FallbackReason, SourceFindings,
};
use crate::risks::{digest, parse_check_risks};

/// What caused a cycle. Every trigger runs the full pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleTrigger {
    InitialLoad,
    UserRefresh,
    ItineraryEdited,
}

impl CycleTrigger {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InitialLoad => "initial_load",
            Self::UserRefresh => "user_refresh",
            Self::ItineraryEdited => "itinerary_edited",
        }
    }
}

/// Result of one `refresh` call.
#[derive(Debug, Clone)]
pub enum CycleOutcome {
    /// The cycle was the latest when it finished and its result is now
    /// returned by `latest()`.
    Published(Arc<ReconciliationResult>),
    /// A newer cycle was issued while this one ran. Nothing was published.
    Superseded { generation: u64, latest: u64 },
}

impl CycleOutcome {
    pub fn published(&self) -> Option<&Arc<ReconciliationResult>> {
        match self {
            Self::Published(result) => Some(result),
            Self::Superseded { .. } => None,
        }
    }

    pub fn is_superseded(&self) -> bool {
        matches!(self, Self::Superseded { .. })
    }
}

/// Runs reconciliation cycles for a trip and holds the latest result.
pub struct ReconciliationEngine<B> {
    gateway: SourceGateway<B>,
    config: ReadinessConfig,
    matcher: Arc<dyn EvidenceMatcher>,
    generations: GenerationCounter,
    published: RwLock<Option<Arc<ReconciliationResult>>>,
    events: EventDispatcher,
}

impl<B: ReadinessBackend> ReconciliationEngine<B> {
    pub fn new(backend: Arc<B>, config: ReadinessConfig) -> Self {
        let matcher = matcher_for(&config.enrichment);
        Self {
            gateway: SourceGateway::new(backend, config.gateway.clone()),
            config,
            matcher,
            generations: GenerationCounter::new(),
            published: RwLock::new(None),
            events: EventDispatcher::new(),
        }
    }

    /// Replace the evidence matcher built from the enrichment config.
    pub fn with_matcher(mut self, matcher: Arc<dyn EvidenceMatcher>) -> Self {
        self.matcher = matcher;
        self
    }

    pub fn register_handler(&mut self, handler: Arc<dyn ReconcileEventHandler>) {
        self.events.register(handler);
    }

    pub fn config(&self) -> &ReadinessConfig {
        &self.config
    }

    pub fn backend(&self) -> &Arc<B> {
        self.gateway.backend()
    }

    /// Generation of the most recently started cycle.
    pub fn current_generation(&self) -> u64 {
        self.generations.current()
    }

    /// The most recently published result.
    pub fn latest(&self) -> Option<Arc<ReconciliationResult>> {
        self.published
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Run one full cycle for `trip_id`.
    ///
    /// Fails only when the trip itself cannot be loaded. A cycle overtaken
    /// by a newer one returns `Superseded` and leaves the published result
    /// untouched.
    pub async fn refresh(
        &self,
        trip_id: &str,
        trigger: CycleTrigger,
    ) -> Result<CycleOutcome, ReconcileError> {
        let started = Instant::now();
        let token = self.generations.issue();
        debug!(trip_id, generation = token.generation(), trigger = trigger.as_str(), "cycle started");
        self.events.emit_cycle_started(&CycleStartedEvent {
            trip_id: trip_id.to_string(),
            generation: token.generation(),
            trigger: trigger.as_str(),
        });

        let snapshot = self.gateway.fetch_all(trip_id).await?;

        if !token.is_latest() {
            return Ok(self.superseded(trip_id, &token));
        }

        let mut result = reconcile(&snapshot, &self.config, self.matcher.as_ref());
        result.generation = token.generation();
        self.emit_diagnostics(trip_id, &result);

        let finding_count = result.categorized_findings.len();
        let gate_status = result.gate_status;
        let outcome = self.publish(&token, result);
        match &outcome {
            CycleOutcome::Published(_) => {
                let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
                info!(
                    trip_id,
                    generation = token.generation(),
                    gate = gate_status.map(|g| g.as_str()).unwrap_or("NO_DATA"),
                    findings = finding_count,
                    duration_ms,
                    "cycle published"
                );
                self.events.emit_cycle_published(&CyclePublishedEvent {
                    trip_id: trip_id.to_string(),
                    generation: token.generation(),
                    gate_status,
                    finding_count,
                    duration_ms,
                });
            }
            CycleOutcome::Superseded { latest, .. } => {
                self.events.emit_cycle_superseded(&CycleSupersededEvent {
                    trip_id: trip_id.to_string(),
                    generation: token.generation(),
                    latest: *latest,
                });
            }
        }
        Ok(outcome)
    }

    /// Store `result` if `token` is still the latest. The check and the
    /// store happen under the same write lock.
    fn publish(&self, token: &CycleToken, result: ReconciliationResult) -> CycleOutcome {
        let mut slot = self
            .published
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if !token.is_latest() {
            debug!(generation = token.generation(), latest = token.latest_generation(), "cycle superseded before publish");
            return CycleOutcome::Superseded {
                generation: token.generation(),
                latest: token.latest_generation(),
            };
        }
        let result = Arc::new(result);
        *slot = Some(Arc::clone(&result));
        CycleOutcome::Published(result)
    }

    fn superseded(&self, trip_id: &str, token: &CycleToken) -> CycleOutcome {
        let latest = token.latest_generation();
        debug!(trip_id, generation = token.generation(), latest, "cycle superseded after fetch");
        self.events.emit_cycle_superseded(&CycleSupersededEvent {
            trip_id: trip_id.to_string(),
            generation: token.generation(),
            latest,
        });
        CycleOutcome::Superseded {
            generation: token.generation(),
            latest,
        }
    }

    fn emit_diagnostics(&self, trip_id: &str, result: &ReconciliationResult) {
        let diagnostics = &result.diagnostics;
        for source in &diagnostics.unavailable_sources {
            self.events.emit_source_unavailable(&SourceUnavailableEvent {
                trip_id: trip_id.to_string(),
                source: source.source.clone(),
                reason: source.reason.clone(),
            });
        }
        for skipped in &diagnostics.skipped_items {
            self.events.emit_item_skipped(&ItemSkippedEvent {
                trip_id: trip_id.to_string(),
                source: skipped.source.clone(),
                reason: skipped.reason.clone(),
            });
        }
        if let Some(reason) = &diagnostics.fallback_reason {
            self.events.emit_fallback_applied(&FallbackAppliedEvent {
                trip_id: trip_id.to_string(),
                used: result.finding_source,
                reason: reason.clone(),
            });
        }
    }
}

impl<B> std::fmt::Debug for ReconciliationEngine<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReconciliationEngine")
            .field("generation", &self.generations.current())
            .field("matcher", &self.matcher.name())
            .field("events", &self.events)
            .finish()
    }
}

fn origin_of(kind: SourceKind) -> FindingSource {
    match kind {
        SourceKind::LegacyCheck => FindingSource::Legacy,
        _ => FindingSource::Primary,
    }
}

/// Pure reconciliation of one snapshot. `generation` is left at 0 for the
/// caller to stamp.
pub fn reconcile(
    snapshot: &SourceSnapshot,
    config: &ReadinessConfig,
    matcher: &dyn EvidenceMatcher,
) -> ReconciliationResult {
    let mut skipped: Vec<SkippedItem> = Vec::new();

    // Source 1: primary check, or legacy when the primary is absent.
    let check = snapshot.check_payload();
    let mut check_risks = None;
    let source1 = check.map(|(kind, payload)| {
        let extracted = extract_nested(kind, &payload.findings);
        skipped.extend(extracted.skipped);
        let (risks, risk_items) = parse_check_risks(kind, &payload.risks);
        skipped.extend(risk_items.skipped);
        check_risks = Some(risks);
        SourceFindings::new(
            origin_of(kind),
            normalize_all(extracted.items),
            payload.summary.unwrap_or_default(),
        )
    });
    let source1_summary = source1.as_ref().map(|s| s.summary);

    // Source 2: score breakdown flat findings.
    let breakdown = snapshot.score_breakdown.available().map(|payload| {
        let (breakdown, extracted) = parse_score_breakdown(payload);
        skipped.extend(extracted.skipped);
        breakdown
    });
    let source2 = breakdown.as_ref().map(|b| {
        SourceFindings::new(
            FindingSource::ScoreBreakdown,
            normalize_all(b.findings.clone()),
            b.summary,
        )
    });

    let data_state = if source1.is_none() && breakdown.is_none() {
        DataState::NoData
    } else {
        DataState::Evaluated
    };

    let selection = select_findings(source1, source2);
    let self_inconsistent = selection.reason == FallbackReason::Source1SelfInconsistent;
    if self_inconsistent {
        warn!(
            trip_id = %snapshot.trip.id,
            summary = ?source1_summary,
            used = ?selection.origin,
            "check result lists no findings but reports nonzero counts"
        );
    }
    let fallback_reason = selection
        .reason
        .is_fallback()
        .then(|| selection.reason.to_string());

    let deduped = dedup(selection.findings);
    let mut findings = deduped.items;
    if let Some(coverage) = snapshot.coverage_map.available() {
        enrich(&mut findings, coverage, matcher);
    }
    let categorized_findings = categorize(findings);

    let overall_score = breakdown.as_ref().and_then(|b| b.overall_score);
    let summaries: Vec<_> = source1_summary
        .into_iter()
        .chain(breakdown.as_ref().map(|b| b.summary))
        .collect();
    let verdict = GateEvaluator::new(&config.gate).evaluate(
        categorized_findings.counts(),
        &summaries,
        overall_score,
    );
    let gate_status = match data_state {
        DataState::NoData => None,
        DataState::Evaluated => Some(verdict.status),
    };

    let raw_alerts = snapshot
        .persona_alerts
        .available()
        .map(Vec::as_slice)
        .unwrap_or_default();
    let (alerts, alert_items) = parse_persona_alerts(raw_alerts);
    skipped.extend(alert_items.skipped);
    let reconciled = AlertReconciler::new(&config.alerts).reconcile(alerts);

    let risks = digest(snapshot.risk_warnings.available(), check_risks.as_deref());
    let evidence_status = snapshot
        .coverage_map
        .available()
        .and_then(|c| c.evidence_status_summary);

    let markers: BTreeMap<String, MarkerSet> = snapshot
        .finding_markers
        .available()
        .map(|markers| {
            categorized_findings
                .iter()
                .filter_map(|f| f.id.as_deref())
                .filter_map(|id| markers.for_id(id).map(|set| (id.to_string(), set)))
                .collect()
        })
        .unwrap_or_default();

    ReconciliationResult {
        generation: 0,
        trip_id: snapshot.trip.id.clone(),
        data_state,
        gate_status,
        finding_source: selection.origin,
        overall_score,
        level_counts: verdict.counts,
        blockers: categorized_findings.blockers.clone(),
        categorized_findings,
        persona_alerts: reconciled.groups,
        risks,
        evidence_status,
        markers,
        diagnostics: Diagnostics {
            unavailable_sources: snapshot.unavailable_sources(),
            skipped_items: skipped,
            duplicate_findings: deduped.duplicates,
            duplicate_alerts: reconciled.duplicates,
            primary_self_inconsistent: self_inconsistent,
            fallback_reason,
        },
    }
}
