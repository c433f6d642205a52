//! Fatal reconciliation errors.

use super::error_code::{self, ReadinessErrorCode};
use super::SourceError;

/// Errors that abort a whole reconciliation cycle.
///
/// Only failures to load the trip itself land here. Every other upstream
/// failure degrades the result instead of propagating.
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    #[error("Trip not found: {trip_id}")]
    TripNotFound { trip_id: String },

    #[error("Not authorized to read trip {trip_id}")]
    Unauthorized { trip_id: String },

    #[error("Trip {trip_id} could not be loaded: {source}")]
    TripUnavailable {
        trip_id: String,
        #[source]
        source: SourceError,
    },
}

impl ReconcileError {
    /// Classify a trip-load failure into the matching fatal variant.
    pub fn from_trip_load(trip_id: &str, err: SourceError) -> Self {
        if err.is_not_found() {
            Self::TripNotFound {
                trip_id: trip_id.to_string(),
            }
        } else if err.is_unauthorized() {
            Self::Unauthorized {
                trip_id: trip_id.to_string(),
            }
        } else {
            Self::TripUnavailable {
                trip_id: trip_id.to_string(),
                source: err,
            }
        }
    }
}

impl ReadinessErrorCode for ReconcileError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::TripNotFound { .. } => error_code::TRIP_NOT_FOUND,
            Self::Unauthorized { .. } => error_code::UNAUTHORIZED,
            Self::TripUnavailable { .. } => error_code::TRIP_UNAVAILABLE,
        }
    }
}
