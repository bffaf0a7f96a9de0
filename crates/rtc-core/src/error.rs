//! Core error type.
//!
//! The only failure a run can have is a rejected configuration; once a run
//! starts it always reaches its horizon.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RtcError {
    #[error("invalid configuration: `{field}` {reason}")]
    InvalidConfiguration {
        field:  &'static str,
        reason: String,
    },
}

impl RtcError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        RtcError::InvalidConfiguration { field, reason: reason.into() }
    }

    /// Name of the configuration field that failed validation.
    pub fn field(&self) -> &'static str {
        match self {
            RtcError::InvalidConfiguration { field, .. } => field,
        }
    }
}

/// Shorthand result type for all `rtc-*` crates.
pub type RtcResult<T> = Result<T, RtcError>;
