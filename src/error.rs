//! Error types for core computations.
//!
//! Fatal conditions (invalid price-request interval, malformed time string)
//! surface as explicit [`CoreError`] values so callers can decide whether to
//! skip the offending record or abort the batch. Non-fatal conditions
//! (booking outside the displayed grid, deleted service) never reach this
//! type: they degrade to absent/zero results at the call site.

use crate::models::TimeOfDay;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Error type for core operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CoreError {
    /// A price request's end time is not after its start time.
    /// Computing a zero or negative duration would mis-price the booking,
    /// so the request is rejected outright.
    #[error("invalid interval: start {start} must be before end {end}")]
    InvalidInterval { start: TimeOfDay, end: TimeOfDay },

    /// A time string failed to parse as "HH:mm" or "HH:mm:ss".
    /// No safe default exists for a malformed time value.
    #[error("malformed time string '{input}': {reason}")]
    TimeParse { input: String, reason: String },
}

impl CoreError {
    /// Create an invalid-interval error.
    pub fn invalid_interval(start: TimeOfDay, end: TimeOfDay) -> Self {
        Self::InvalidInterval { start, end }
    }

    /// Create a time-parse error.
    pub fn time_parse(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::TimeParse {
            input: input.into(),
            reason: reason.into(),
        }
    }
}
