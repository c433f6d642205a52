//! Upstream source errors.

use super::error_code::{self, ReadinessErrorCode};

/// Failure of a single upstream source.
///
/// Never escapes the gateway for optional sources: it is carried inside
/// `SourceOutcome::Unavailable` and recorded as a diagnostic.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SourceError {
    #[error("Transport failure: {reason}")]
    Transport { reason: String },

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Decode failure: {reason}")]
    Decode { reason: String },

    #[error("Upstream rejected request ({code}): {message}")]
    Rejected { code: String, message: String },

    #[error("Timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Source not configured: {source_name}")]
    NotConfigured { source_name: String },
}

impl SourceError {
    /// True when the upstream reported the resource as missing, either by
    /// status or by an envelope error code such as `TRIP_NOT_FOUND`.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Status { status, .. } => *status == 404,
            Self::Rejected { code, .. } => code.to_ascii_uppercase().contains("NOT_FOUND"),
            _ => false,
        }
    }

    /// True when the upstream refused the caller, by 401/403 or by an
    /// envelope code such as `UNAUTHORIZED` or `FORBIDDEN_TRIP`.
    pub fn is_unauthorized(&self) -> bool {
        match self {
            Self::Status { status, .. } => matches!(status, 401 | 403),
            Self::Rejected { code, .. } => {
                let code = code.to_ascii_uppercase();
                ["UNAUTHORIZED", "UNAUTHENTICATED", "FORBIDDEN"]
                    .iter()
                    .any(|marker| code.contains(marker))
            }
            _ => false,
        }
    }
}

impl ReadinessErrorCode for SourceError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Timeout { .. } => error_code::SOURCE_TIMEOUT,
            Self::Decode { .. } => error_code::SOURCE_DECODE,
            Self::Rejected { .. } => error_code::SOURCE_REJECTED,
            Self::Transport { .. } | Self::Status { .. } | Self::NotConfigured { .. } => {
                error_code::SOURCE_UNAVAILABLE
            }
        }
    }
}
