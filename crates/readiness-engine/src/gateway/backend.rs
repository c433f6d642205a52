//! ReadinessBackend trait and the payload shapes it returns.
//!
//! Group-level structure is decoded strictly; individual findings, risks,
//! and alerts stay as raw JSON so one malformed item never discards its
//! siblings. The normalizer parses them one at a time.

use std::future::Future;

use readiness_core::errors::SourceError;
use readiness_core::types::{CoverageMap, FindingMarkers, LevelSummary, RiskWarnings, TripRecord};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One async method per upstream collaborator.
///
/// Implementations report failures as `SourceError`. Classifying them as
/// fatal or degrading is the gateway's job.
pub trait ReadinessBackend: Send + Sync {
    fn get_trip(&self, trip_id: &str) -> impl Future<Output = Result<TripRecord, SourceError>> + Send;

    fn get_readiness_check(
        &self,
        trip_id: &str,
        lang: &str,
    ) -> impl Future<Output = Result<ReadinessCheckPayload, SourceError>> + Send;

    fn get_score_breakdown(
        &self,
        trip_id: &str,
    ) -> impl Future<Output = Result<ScoreBreakdownPayload, SourceError>> + Send;

    fn get_coverage_map(
        &self,
        trip_id: &str,
    ) -> impl Future<Output = Result<CoverageMap, SourceError>> + Send;

    fn get_risk_warnings(
        &self,
        trip_id: &str,
        lang: &str,
        user_id: Option<&str>,
    ) -> impl Future<Output = Result<RiskWarnings, SourceError>> + Send;

    fn get_persona_alerts(
        &self,
        trip_id: &str,
    ) -> impl Future<Output = Result<Vec<Value>, SourceError>> + Send;

    fn get_finding_markers(
        &self,
        trip_id: &str,
    ) -> impl Future<Output = Result<FindingMarkers, SourceError>> + Send;

    fn run_legacy_check(
        &self,
        request: &LegacyCheckRequest,
    ) -> impl Future<Output = Result<ReadinessCheckPayload, SourceError>> + Send;
}

/// Primary readiness check response (`GET /readiness/trip/{id}`), also the
/// shape the legacy `POST /readiness/check` returns.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessCheckPayload {
    /// Groups of `{blockers, must, should, optional}` item lists.
    #[serde(default, deserialize_with = "null_as_default")]
    pub findings: Vec<Value>,
    #[serde(default)]
    pub summary: Option<LevelSummary>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub risks: Vec<Value>,
}

/// Score breakdown response (`GET /readiness/score-breakdown`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdownPayload {
    #[serde(default)]
    pub overall_score: Option<f64>,
    /// Nested form `score.overall`, used when `overallScore` is absent.
    #[serde(default)]
    pub score: Option<ScoreValue>,
    #[serde(default)]
    pub summary: Option<LevelSummary>,
    /// Flat `findings[]` with a `type` discriminator.
    #[serde(default, deserialize_with = "null_as_default")]
    pub findings: Vec<Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreValue {
    #[serde(default)]
    pub overall: Option<f64>,
}

impl ScoreBreakdownPayload {
    /// Reported overall score, preferring the top-level field.
    pub fn reported_score(&self) -> Option<f64> {
        self.overall_score
            .or_else(|| self.score.and_then(|s| s.overall))
    }
}

/// Request body of the legacy readiness check, built from the trip record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyCheckRequest {
    pub destination_id: String,
    pub trip: LegacyTripDates,
    pub itinerary: LegacyItinerary,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyTripDates {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LegacyItinerary {
    pub countries: Vec<String>,
}

impl LegacyCheckRequest {
    /// Build the request from destination and dates of the trip.
    pub fn from_trip(trip: &TripRecord) -> Self {
        let destination = trip
            .destination
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty());
        Self {
            destination_id: destination.unwrap_or_default().to_string(),
            trip: LegacyTripDates {
                start_date: trip.start_date.clone(),
                end_date: trip.end_date.clone(),
            },
            itinerary: LegacyItinerary {
                countries: destination.map(|d| vec![d.to_string()]).unwrap_or_default(),
            },
        }
    }
}

/// Upstreams send `null` for empty lists.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
