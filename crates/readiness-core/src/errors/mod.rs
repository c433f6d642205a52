//! Error handling for the readiness engine.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod error_code;
pub mod reconcile_error;
pub mod source_error;

pub use config_error::ConfigError;
pub use error_code::ReadinessErrorCode;
pub use reconcile_error::ReconcileError;
pub use source_error::SourceError;
