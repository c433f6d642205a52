//! Source gateway configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for the upstream fan-out.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Base URL of the readiness API. Required by the HTTP backend only.
    pub base_url: Option<String>,
    /// Per-source timeout in milliseconds. Default: 8000.
    pub source_timeout_ms: Option<u64>,
    /// Timeout for loading the trip record. Default: 10000.
    pub trip_timeout_ms: Option<u64>,
    /// Language code forwarded to language-aware sources. Default: "en".
    pub lang: Option<String>,
    /// User id forwarded to the risk-warnings source.
    pub user_id: Option<String>,
}

impl GatewayConfig {
    pub fn effective_source_timeout(&self) -> Duration {
        Duration::from_millis(self.source_timeout_ms.unwrap_or(8_000))
    }

    pub fn effective_trip_timeout(&self) -> Duration {
        Duration::from_millis(self.trip_timeout_ms.unwrap_or(10_000))
    }

    pub fn effective_lang(&self) -> &str {
        self.lang.as_deref().unwrap_or("en")
    }
}
