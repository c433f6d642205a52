//! Shared fixtures: an in-memory `ReadinessBackend` and snapshot builders.
#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use readiness_core::errors::SourceError;
use readiness_core::types::{CoverageMap, FindingMarkers, RiskWarnings, TripRecord};
use readiness_engine::gateway::{
    LegacyCheckRequest, ReadinessBackend, ReadinessCheckPayload, ScoreBreakdownPayload,
    SourceOutcome, SourceSnapshot,
};
use serde_json::Value;

pub fn trip(id: &str) -> TripRecord {
    TripRecord {
        id: id.to_string(),
        destination: Some("IS".to_string()),
        start_date: Some("2026-07-01".to_string()),
        end_date: Some("2026-07-10".to_string()),
    }
}

pub fn server_error() -> SourceError {
    SourceError::Status {
        status: 500,
        body: "internal".to_string(),
    }
}

pub fn check(value: Value) -> ReadinessCheckPayload {
    serde_json::from_value(value).unwrap()
}

pub fn breakdown(value: Value) -> ScoreBreakdownPayload {
    serde_json::from_value(value).unwrap()
}

/// Snapshot with every optional source unavailable.
pub fn empty_snapshot(trip_id: &str) -> SourceSnapshot {
    SourceSnapshot::unavailable(trip(trip_id), server_error())
}

/// Snapshot with the given primary check and score breakdown, everything
/// else unavailable.
pub fn snapshot(primary: Option<Value>, score: Option<Value>) -> SourceSnapshot {
    let mut snap = empty_snapshot("trip-1");
    if let Some(primary) = primary {
        snap.readiness_check = SourceOutcome::Available(check(primary));
    }
    if let Some(score) = score {
        snap.score_breakdown = SourceOutcome::Available(breakdown(score));
    }
    snap
}

/// In-memory backend. Every source returns a configured result after an
/// optional delay, and calls are counted per source.
pub struct FakeBackend {
    pub trip: Result<TripRecord, SourceError>,
    pub readiness_check: Result<ReadinessCheckPayload, SourceError>,
    pub score_breakdown: Result<ScoreBreakdownPayload, SourceError>,
    pub coverage_map: Result<CoverageMap, SourceError>,
    pub risk_warnings: Result<RiskWarnings, SourceError>,
    pub persona_alerts: Result<Vec<Value>, SourceError>,
    pub finding_markers: Result<FindingMarkers, SourceError>,
    pub legacy_check: Result<ReadinessCheckPayload, SourceError>,
    /// Fixed delay per source name.
    pub delays: HashMap<&'static str, Duration>,
    /// Delays consumed one per `get_trip` call, ahead of `delays["trip"]`.
    pub trip_delays: Mutex<VecDeque<Duration>>,
    /// Results consumed one per `get_trip` call, ahead of `trip`.
    pub trip_results: Mutex<VecDeque<Result<TripRecord, SourceError>>>,
    calls: Mutex<HashMap<&'static str, usize>>,
    pub legacy_requests: Mutex<Vec<LegacyCheckRequest>>,
    pub total_calls: AtomicUsize,
}

impl FakeBackend {
    /// Every optional source fails; the trip loads.
    pub fn new(trip_id: &str) -> Self {
        Self {
            trip: Ok(trip(trip_id)),
            readiness_check: Err(server_error()),
            score_breakdown: Err(server_error()),
            coverage_map: Err(server_error()),
            risk_warnings: Err(server_error()),
            persona_alerts: Err(server_error()),
            finding_markers: Err(server_error()),
            legacy_check: Err(server_error()),
            delays: HashMap::new(),
            trip_delays: Mutex::new(VecDeque::new()),
            trip_results: Mutex::new(VecDeque::new()),
            calls: Mutex::new(HashMap::new()),
            legacy_requests: Mutex::new(Vec::new()),
            total_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, source: &'static str, delay: Duration) -> Self {
        self.delays.insert(source, delay);
        self
    }

    pub fn calls(&self, source: &str) -> usize {
        self.calls.lock().unwrap().get(source).copied().unwrap_or(0)
    }

    async fn enter(&self, source: &'static str) {
        self.total_calls.fetch_add(1, Ordering::SeqCst);
        *self.calls.lock().unwrap().entry(source).or_insert(0) += 1;
        let queued = if source == "trip" {
            self.trip_delays.lock().unwrap().pop_front()
        } else {
            None
        };
        if let Some(delay) = queued.or_else(|| self.delays.get(source).copied()) {
            tokio::time::sleep(delay).await;
        }
    }
}

impl ReadinessBackend for FakeBackend {
    async fn get_trip(&self, _trip_id: &str) -> Result<TripRecord, SourceError> {
        self.enter("trip").await;
        let queued = self.trip_results.lock().unwrap().pop_front();
        queued.unwrap_or_else(|| self.trip.clone())
    }

    async fn get_readiness_check(
        &self,
        _trip_id: &str,
        _lang: &str,
    ) -> Result<ReadinessCheckPayload, SourceError> {
        self.enter("readiness_check").await;
        self.readiness_check.clone()
    }

    async fn get_score_breakdown(&self, _trip_id: &str) -> Result<ScoreBreakdownPayload, SourceError> {
        self.enter("score_breakdown").await;
        self.score_breakdown.clone()
    }

    async fn get_coverage_map(&self, _trip_id: &str) -> Result<CoverageMap, SourceError> {
        self.enter("coverage_map").await;
        self.coverage_map.clone()
    }

    async fn get_risk_warnings(
        &self,
        _trip_id: &str,
        _lang: &str,
        _user_id: Option<&str>,
    ) -> Result<RiskWarnings, SourceError> {
        self.enter("risk_warnings").await;
        self.risk_warnings.clone()
    }

    async fn get_persona_alerts(&self, _trip_id: &str) -> Result<Vec<Value>, SourceError> {
        self.enter("persona_alerts").await;
        self.persona_alerts.clone()
    }

    async fn get_finding_markers(&self, _trip_id: &str) -> Result<FindingMarkers, SourceError> {
        self.enter("finding_markers").await;
        self.finding_markers.clone()
    }

    async fn run_legacy_check(
        &self,
        request: &LegacyCheckRequest,
    ) -> Result<ReadinessCheckPayload, SourceError> {
        self.legacy_requests.lock().unwrap().push(request.clone());
        self.enter("legacy_check").await;
        self.legacy_check.clone()
    }
}
