//! Configuration system for the readiness engine.
//! TOML-based, layered resolution: CLI > env > project file > defaults.

pub mod alert_config;
pub mod enrichment_config;
pub mod gate_config;
pub mod gateway_config;
pub mod readiness_config;

pub use alert_config::AlertConfig;
pub use enrichment_config::EnrichmentConfig;
pub use gate_config::GateConfig;
pub use gateway_config::GatewayConfig;
pub use readiness_config::{CliOverrides, ReadinessConfig};
