//! ReadinessErrorCode trait for consumer-facing error codes.

/// Trait for mapping readiness errors to stable error code strings.
/// Every error enum implements this so consumers can branch on a code
/// instead of matching message text.
pub trait ReadinessErrorCode {
    /// Returns the error code string (e.g., "TRIP_NOT_FOUND").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

// Error code constants.
pub const TRIP_NOT_FOUND: &str = "TRIP_NOT_FOUND";
pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
pub const TRIP_UNAVAILABLE: &str = "TRIP_UNAVAILABLE";
pub const SOURCE_UNAVAILABLE: &str = "SOURCE_UNAVAILABLE";
pub const SOURCE_TIMEOUT: &str = "SOURCE_TIMEOUT";
pub const SOURCE_DECODE: &str = "SOURCE_DECODE";
pub const SOURCE_REJECTED: &str = "SOURCE_REJECTED";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
