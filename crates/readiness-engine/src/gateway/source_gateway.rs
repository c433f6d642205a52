//! SourceGateway: settle-all fan-out over a `ReadinessBackend`.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use readiness_core::config::GatewayConfig;
use readiness_core::errors::{ReconcileError, SourceError};
use tracing::{debug, warn};

use super::backend::{LegacyCheckRequest, ReadinessBackend};
use super::snapshot::{SourceKind, SourceOutcome, SourceSnapshot};

/// Gathers every upstream signal for a trip.
#[derive(Debug)]
pub struct SourceGateway<B> {
    backend: Arc<B>,
    config: GatewayConfig,
}

impl<B: ReadinessBackend> SourceGateway<B> {
    pub fn new(backend: Arc<B>, config: GatewayConfig) -> Self {
        Self { backend, config }
    }

    pub fn backend(&self) -> &Arc<B> {
        &self.backend
    }

    /// Load the trip, then fetch all optional sources concurrently.
    ///
    /// Only a failed trip load is returned as an error. Each optional source
    /// is bounded by the source timeout and settles independently.
    pub async fn fetch_all(&self, trip_id: &str) -> Result<SourceSnapshot, ReconcileError> {
        let trip_timeout = self.config.effective_trip_timeout();
        let trip = settle(SourceKind::Trip, trip_timeout, self.backend.get_trip(trip_id)).await;
        let trip = match trip {
            SourceOutcome::Available(trip) => trip,
            SourceOutcome::Unavailable(err) => {
                return Err(ReconcileError::from_trip_load(trip_id, err));
            }
        };

        let timeout = self.config.effective_source_timeout();
        let lang = self.config.effective_lang();
        let user_id = self.config.user_id.as_deref();
        let backend = &self.backend;

        let (readiness_check, score_breakdown, coverage_map, risk_warnings, persona_alerts, finding_markers) = tokio::join!(
            settle(SourceKind::ReadinessCheck, timeout, backend.get_readiness_check(trip_id, lang)),
            settle(SourceKind::ScoreBreakdown, timeout, backend.get_score_breakdown(trip_id)),
            settle(SourceKind::CoverageMap, timeout, backend.get_coverage_map(trip_id)),
            settle(
                SourceKind::RiskWarnings,
                timeout,
                backend.get_risk_warnings(trip_id, lang, user_id)
            ),
            settle(SourceKind::PersonaAlerts, timeout, backend.get_persona_alerts(trip_id)),
            settle(SourceKind::FindingMarkers, timeout, backend.get_finding_markers(trip_id)),
        );

        // The legacy check stands in for an absent primary only.
        let legacy_check = if readiness_check.is_available() {
            None
        } else {
            let request = LegacyCheckRequest::from_trip(&trip);
            Some(settle(SourceKind::LegacyCheck, timeout, backend.run_legacy_check(&request)).await)
        };

        Ok(SourceSnapshot {
            trip,
            readiness_check,
            legacy_check,
            score_breakdown,
            coverage_map,
            risk_warnings,
            persona_alerts,
            finding_markers,
        })
    }
}

/// Await one source under `timeout`, converting every failure into
/// `SourceOutcome::Unavailable`.
async fn settle<T, F>(kind: SourceKind, timeout: Duration, fut: F) -> SourceOutcome<T>
where
    F: Future<Output = Result<T, SourceError>>,
{
    match tokio::time::timeout(timeout, fut).await {
        Ok(Ok(value)) => {
            debug!(source = %kind, "source settled");
            SourceOutcome::Available(value)
        }
        Ok(Err(err)) => {
            warn!(source = %kind, error = %err, "source unavailable");
            SourceOutcome::Unavailable(err)
        }
        Err(_) => {
            let timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
            warn!(source = %kind, timeout_ms, "source timed out");
            SourceOutcome::Unavailable(SourceError::Timeout { timeout_ms })
        }
    }
}
