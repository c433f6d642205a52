//! Response envelope of the readiness REST surface.

use readiness_core::errors::SourceError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Longest upstream body kept in an error, in bytes.
const MAX_ERROR_BODY: usize = 512;

/// Envelope wrapping every API response: `{success, data, error}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<ApiError>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Unwrap the payload, turning `success: false` into `Rejected`.
    pub fn into_result(self) -> Result<T, SourceError> {
        if !self.success {
            let error = self.error.unwrap_or_default();
            return Err(SourceError::Rejected {
                code: error.code.unwrap_or_else(|| "UNKNOWN".to_string()),
                message: error.message.unwrap_or_else(|| "request failed".to_string()),
            });
        }
        self.data.ok_or_else(|| SourceError::Decode {
            reason: "envelope reported success without data".to_string(),
        })
    }
}

/// Decode an enveloped response body.
pub fn decode_envelope<T: DeserializeOwned>(body: &str) -> Result<T, SourceError> {
    let envelope: ApiEnvelope<T> = serde_json::from_str(body).map_err(decode_error)?;
    envelope.into_result()
}

/// Map a non-success HTTP status to a `SourceError`, keeping a bounded
/// prefix of the body for diagnostics.
pub fn status_error(status: u16, body: &str) -> SourceError {
    let mut end = body.len().min(MAX_ERROR_BODY);
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    SourceError::Status {
        status,
        body: body[..end].to_string(),
    }
}

pub fn decode_error(err: serde_json::Error) -> SourceError {
    SourceError::Decode {
        reason: err.to_string(),
    }
}
