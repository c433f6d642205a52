//! `ReadinessBackend` over the readiness REST API.

use readiness_core::config::GatewayConfig;
use readiness_core::errors::SourceError;
use readiness_core::types::{CoverageMap, FindingMarkers, RiskWarnings, TripRecord};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::backend::{LegacyCheckRequest, ReadinessBackend, ReadinessCheckPayload, ScoreBreakdownPayload};
use super::protocol::{decode_envelope, status_error};

/// HTTP client for the readiness endpoints. Every response is unwrapped
/// from the `{success, data, error}` envelope.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
    base: Url,
    bearer_token: Option<String>,
    request_timeout_ms: u64,
}

impl HttpBackend {
    /// Build a backend from the gateway config. Requires `base_url`.
    pub fn new(config: &GatewayConfig) -> Result<Self, SourceError> {
        let base_url = config
            .base_url
            .as_deref()
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .ok_or_else(|| SourceError::NotConfigured {
                source_name: "gateway.base_url".to_string(),
            })?;
        let base = Url::parse(&base_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| SourceError::NotConfigured {
                source_name: format!("gateway.base_url ({base_url} is not a base URL)"),
            })?;

        // Per-source deadlines are enforced by the gateway. This only caps
        // requests issued outside of it.
        let request_timeout = config.effective_trip_timeout();
        let request_timeout_ms = u64::try_from(request_timeout.as_millis()).unwrap_or(u64::MAX);
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .user_agent(concat!("readiness-engine/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| transport_error(e, request_timeout_ms))?;

        Ok(Self {
            client,
            base_url,
            base,
            bearer_token: None,
            request_timeout_ms,
        })
    }

    /// Attach a bearer token to every request.
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Base URL extended by `segments`, each percent-encoded as one path
    /// segment.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.bearer_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, &str)],
    ) -> Result<T, SourceError> {
        debug!(path = url.path(), "GET");
        let request = self.authorize(self.client.get(url).query(query));
        self.execute(request).await
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T, SourceError> {
        debug!(path = url.path(), "POST");
        let request = self.authorize(self.client.post(url).json(body));
        self.execute(request).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, SourceError> {
        let timeout_ms = self.request_timeout_ms;
        let response = request
            .send()
            .await
            .map_err(|e| transport_error(e, timeout_ms))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| transport_error(e, timeout_ms))?;
        if !status.is_success() {
            return Err(status_error(status.as_u16(), &body));
        }
        decode_envelope(&body)
    }
}

/// Map a `reqwest` failure, keeping timeouts distinguishable.
fn transport_error(err: reqwest::Error, timeout_ms: u64) -> SourceError {
    if err.is_timeout() {
        return SourceError::Timeout { timeout_ms };
    }
    if let Some(status) = err.status() {
        return SourceError::Status {
            status: status.as_u16(),
            body: err.to_string(),
        };
    }
    SourceError::Transport {
        reason: err.to_string(),
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CheckedItems {
    #[serde(default, alias = "checked")]
    checked_items: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NotApplicableItems {
    #[serde(default)]
    not_applicable_items: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LaterItems {
    #[serde(default)]
    later_items: Vec<String>,
}

impl ReadinessBackend for HttpBackend {
    async fn get_trip(&self, trip_id: &str) -> Result<TripRecord, SourceError> {
        self.get_json(self.endpoint(&["trips", trip_id]), &[]).await
    }

    async fn get_readiness_check(
        &self,
        trip_id: &str,
        lang: &str,
    ) -> Result<ReadinessCheckPayload, SourceError> {
        self.get_json(self.endpoint(&["readiness", "trip", trip_id]), &[("lang", lang)])
            .await
    }

    async fn get_score_breakdown(&self, trip_id: &str) -> Result<ScoreBreakdownPayload, SourceError> {
        self.get_json(self.endpoint(&["readiness", "score-breakdown"]), &[("tripId", trip_id)])
            .await
    }

    async fn get_coverage_map(&self, trip_id: &str) -> Result<CoverageMap, SourceError> {
        self.get_json(self.endpoint(&["readiness", "coverage-map"]), &[("tripId", trip_id)])
            .await
    }

    async fn get_risk_warnings(
        &self,
        trip_id: &str,
        lang: &str,
        user_id: Option<&str>,
    ) -> Result<RiskWarnings, SourceError> {
        let mut query = vec![("tripId", trip_id), ("lang", lang)];
        if let Some(user_id) = user_id {
            query.push(("userId", user_id));
        }
        self.get_json(self.endpoint(&["readiness", "risk-warnings"]), &query)
            .await
    }

    async fn get_persona_alerts(&self, trip_id: &str) -> Result<Vec<Value>, SourceError> {
        self.get_json(self.endpoint(&["trips", trip_id, "persona-alerts"]), &[])
            .await
    }

    /// Markers live in three lists. A list that fails to load counts as
    /// empty; the source is unavailable only when all three fail.
    async fn get_finding_markers(&self, trip_id: &str) -> Result<FindingMarkers, SourceError> {
        let checked_url = self.endpoint(&["readiness", "trip", trip_id, "checklist-status"]);
        let not_applicable_url = self.endpoint(&["readiness", "trip", trip_id, "not-applicable"]);
        let later_url = self.endpoint(&["readiness", "trip", trip_id, "later"]);
        let (checked, not_applicable, later) = tokio::join!(
            self.get_json::<CheckedItems>(checked_url, &[]),
            self.get_json::<NotApplicableItems>(not_applicable_url, &[]),
            self.get_json::<LaterItems>(later_url, &[]),
        );

        if let (Err(err), Err(_), Err(_)) = (&checked, &not_applicable, &later) {
            return Err(err.clone());
        }

        Ok(FindingMarkers {
            checked: checked.unwrap_or_default().checked_items.into_iter().collect(),
            not_applicable: not_applicable
                .unwrap_or_default()
                .not_applicable_items
                .into_iter()
                .collect(),
            later: later.unwrap_or_default().later_items.into_iter().collect(),
        })
    }

    async fn run_legacy_check(
        &self,
        request: &LegacyCheckRequest,
    ) -> Result<ReadinessCheckPayload, SourceError> {
        self.post_json(self.endpoint(&["readiness", "check"]), request)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requires_base_url() {
        let err = HttpBackend::new(&GatewayConfig::default()).unwrap_err();
        assert!(matches!(err, SourceError::NotConfigured { .. }));
    }

    #[test]
    fn trims_trailing_slash() {
        let config = GatewayConfig {
            base_url: Some("https://api.example.test/api/".to_string()),
            ..Default::default()
        };
        let backend = HttpBackend::new(&config).unwrap();
        assert_eq!(backend.base_url(), "https://api.example.test/api");
        assert_eq!(
            backend.endpoint(&["trips", "t1"]).as_str(),
            "https://api.example.test/api/trips/t1"
        );
    }

    #[test]
    fn trip_ids_are_encoded_as_one_segment() {
        let config = GatewayConfig {
            base_url: Some("https://api.example.test".to_string()),
            ..Default::default()
        };
        let backend = HttpBackend::new(&config).unwrap();
        assert_eq!(
            backend.endpoint(&["trips", "t1"]).as_str(),
            "https://api.example.test/trips/t1"
        );
        assert_eq!(
            backend
                .endpoint(&["trips", "../admin?x#y", "persona-alerts"])
                .as_str(),
            "https://api.example.test/trips/..%2Fadmin%3Fx%23y/persona-alerts"
        );
        assert_eq!(
            backend
                .endpoint(&["readiness", "trip", "t 1", "later"])
                .as_str(),
            "https://api.example.test/readiness/trip/t%201/later"
        );
    }

    #[test]
    fn rejects_non_base_url() {
        for url in ["not a url", "mailto:ops@example.test"] {
            let config = GatewayConfig {
                base_url: Some(url.to_string()),
                ..Default::default()
            };
            let err = HttpBackend::new(&config).unwrap_err();
            assert!(matches!(err, SourceError::NotConfigured { .. }));
        }
    }
}
