//! Top-level readiness configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{AlertConfig, EnrichmentConfig, GateConfig, GatewayConfig};
use crate::errors::ConfigError;

/// Project config file name, looked up in the root passed to `load`.
pub const PROJECT_CONFIG_FILE: &str = "readiness.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`READINESS_*`)
/// 3. Project config (`readiness.toml` in the project root)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ReadinessConfig {
    pub gateway: GatewayConfig,
    pub gate: GateConfig,
    pub alerts: AlertConfig,
    pub enrichment: EnrichmentConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub base_url: Option<String>,
    pub lang: Option<String>,
    pub source_timeout_ms: Option<u64>,
    pub warn_below_score: Option<f64>,
}

impl ReadinessConfig {
    /// Load configuration with layered resolution from the process environment.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        Self::load_with_env(root, cli_overrides, |key| std::env::var(key).ok())
    }

    /// Load configuration reading environment values through `env`.
    pub fn load_with_env<F>(
        root: &Path,
        cli_overrides: Option<&CliOverrides>,
        env: F,
    ) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        // Layer 3: project config
        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config, env);

        // Layer 1 (highest priority): CLI flags
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &ReadinessConfig) -> Result<(), ConfigError> {
        if let Some(score) = config.gate.warn_below_score {
            if !(0.0..=100.0).contains(&score) {
                return Err(ConfigError::ValidationFailed {
                    field: "gate.warn_below_score".to_string(),
                    message: "must be between 0 and 100".to_string(),
                });
            }
        }
        if config.gateway.source_timeout_ms == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "gateway.source_timeout_ms".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.gateway.trip_timeout_ms == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "gateway.trip_timeout_ms".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if let Some(ref url) = config.gateway.base_url {
            if url.trim().is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: "gateway.base_url".to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }
        if config
            .enrichment
            .place_markers
            .iter()
            .any(|m| m.trim().is_empty())
        {
            return Err(ConfigError::ValidationFailed {
                field: "enrichment.place_markers".to_string(),
                message: "markers must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut ReadinessConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: ReadinessConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base` values
    /// only when `other` has a `Some` value.
    fn merge(base: &mut ReadinessConfig, other: &ReadinessConfig) {
        // Gateway
        if other.gateway.base_url.is_some() {
            base.gateway.base_url = other.gateway.base_url.clone();
        }
        if other.gateway.source_timeout_ms.is_some() {
            base.gateway.source_timeout_ms = other.gateway.source_timeout_ms;
        }
        if other.gateway.trip_timeout_ms.is_some() {
            base.gateway.trip_timeout_ms = other.gateway.trip_timeout_ms;
        }
        if other.gateway.lang.is_some() {
            base.gateway.lang = other.gateway.lang.clone();
        }
        if other.gateway.user_id.is_some() {
            base.gateway.user_id = other.gateway.user_id.clone();
        }

        // Gate
        if other.gate.warn_below_score.is_some() {
            base.gate.warn_below_score = other.gate.warn_below_score;
        }
        if other.gate.summary_counts_floor.is_some() {
            base.gate.summary_counts_floor = other.gate.summary_counts_floor;
        }

        // Alerts
        if other.alerts.reject_action.is_some() {
            base.alerts.reject_action = other.alerts.reject_action.clone();
        }
        if other.alerts.unspecified_source_label.is_some() {
            base.alerts.unspecified_source_label = other.alerts.unspecified_source_label.clone();
        }

        // Enrichment
        if other.enrichment.enabled.is_some() {
            base.enrichment.enabled = other.enrichment.enabled;
        }
        if other.enrichment.fuzzy_matching.is_some() {
            base.enrichment.fuzzy_matching = other.enrichment.fuzzy_matching;
        }
        if !other.enrichment.place_markers.is_empty() {
            base.enrichment.place_markers = other.enrichment.place_markers.clone();
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `READINESS_BASE_URL`, `READINESS_SOURCE_TIMEOUT_MS`, etc.
    /// Unparseable values are ignored.
    fn apply_env_overrides<F>(config: &mut ReadinessConfig, env: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = env("READINESS_BASE_URL") {
            config.gateway.base_url = Some(val);
        }
        if let Some(val) = env("READINESS_SOURCE_TIMEOUT_MS") {
            if let Ok(v) = val.parse::<u64>() {
                config.gateway.source_timeout_ms = Some(v);
            }
        }
        if let Some(val) = env("READINESS_TRIP_TIMEOUT_MS") {
            if let Ok(v) = val.parse::<u64>() {
                config.gateway.trip_timeout_ms = Some(v);
            }
        }
        if let Some(val) = env("READINESS_LANG") {
            config.gateway.lang = Some(val);
        }
        if let Some(val) = env("READINESS_USER_ID") {
            config.gateway.user_id = Some(val);
        }
        if let Some(val) = env("READINESS_WARN_BELOW_SCORE") {
            if let Ok(v) = val.parse::<f64>() {
                config.gate.warn_below_score = Some(v);
            }
        }
        if let Some(val) = env("READINESS_ENRICHMENT_ENABLED") {
            if let Ok(v) = val.parse::<bool>() {
                config.enrichment.enabled = Some(v);
            }
        }
    }

    /// Apply CLI overrides (highest priority).
    pub fn apply_cli_overrides(config: &mut ReadinessConfig, cli: &CliOverrides) {
        if let Some(ref url) = cli.base_url {
            config.gateway.base_url = Some(url.clone());
        }
        if let Some(ref lang) = cli.lang {
            config.gateway.lang = Some(lang.clone());
        }
        if let Some(timeout) = cli.source_timeout_ms {
            config.gateway.source_timeout_ms = Some(timeout);
        }
        if let Some(score) = cli.warn_below_score {
            config.gate.warn_below_score = Some(score);
        }
    }

    /// Serialize to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::InvalidValue {
            field: "<root>".to_string(),
            message: e.to_string(),
        })
    }
}
