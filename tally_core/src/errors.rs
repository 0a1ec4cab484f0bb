//! # Error Types
//!
//! Structured error types for tally_core. Every failure a render or utility
//! call can hit is represented here so callers can degrade gracefully instead
//! of surfacing a panic to the user.
//!
//! ## Example
//!
//! ```rust
//! use tally_core::errors::{TallyError, TallyResult};
//!
//! fn validate_amount(raw: &str) -> TallyResult<f64> {
//!     match raw.trim().parse::<f64>() {
//!         Ok(v) if v > 0.0 => Ok(v),
//!         _ => Err(TallyError::invalid_input(
//!             "amount",
//!             raw,
//!             "Amount must be a positive number",
//!         )),
//!     }
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::toast::Severity;

/// Result type alias for tally_core operations
pub type TallyResult<T> = Result<T, TallyError>;

/// Structured error type for presentation operations.
///
/// The variants mirror the failure taxonomy of the dashboard: a missing
/// rendering backend, a missing mount region, empty-but-valid data, invalid
/// values, and context ingestion problems. All of them are handled locally by
/// the presenters (log + early return); none are allowed to escape a render
/// call.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum TallyError {
    /// A required rendering/notification backend is not available
    #[error("Backend unavailable: {port}")]
    PortUnavailable { port: String },

    /// The render target the port expected does not exist
    #[error("Mount point missing: {id}")]
    MountMissing { id: String },

    /// Input collection is valid but empty (placeholder state, not a fault)
    #[error("No data for {what}")]
    EmptyData { what: String },

    /// An input value is invalid (out of range, wrong type, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Context document could not be read or parsed
    #[error("Context error: '{path}' - {reason}")]
    ContextError { path: String, reason: String },
}

impl TallyError {
    /// Create a PortUnavailable error
    pub fn port_unavailable(port: impl Into<String>) -> Self {
        TallyError::PortUnavailable { port: port.into() }
    }

    /// Create a MountMissing error
    pub fn mount_missing(id: impl Into<String>) -> Self {
        TallyError::MountMissing { id: id.into() }
    }

    /// Create an EmptyData error
    pub fn empty_data(what: impl Into<String>) -> Self {
        TallyError::EmptyData { what: what.into() }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        TallyError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a ContextError
    pub fn context_error(path: impl Into<String>, reason: impl Into<String>) -> Self {
        TallyError::ContextError {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Empty data is an expected state (placeholder), not a fault
    pub fn is_empty_data(&self) -> bool {
        matches!(self, TallyError::EmptyData { .. })
    }

    /// Toast severity appropriate for surfacing this error to the user
    pub fn toast_severity(&self) -> Severity {
        match self {
            TallyError::PortUnavailable { .. } => Severity::Error,
            TallyError::MountMissing { .. } => Severity::Error,
            TallyError::EmptyData { .. } => Severity::Info,
            TallyError::InvalidInput { .. } => Severity::Warning,
            TallyError::ContextError { .. } => Severity::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = TallyError::invalid_input("amount", "abc", "Amount must be a number");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: TallyError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_toast_severity_mapping() {
        assert_eq!(
            TallyError::port_unavailable("donut").toast_severity(),
            Severity::Error
        );
        assert_eq!(
            TallyError::empty_data("categories").toast_severity(),
            Severity::Info
        );
        assert_eq!(
            TallyError::invalid_input("amount", "-1", "negative").toast_severity(),
            Severity::Warning
        );
    }

    #[test]
    fn test_empty_data_is_not_a_fault() {
        assert!(TallyError::empty_data("trend").is_empty_data());
        assert!(!TallyError::mount_missing("legend").is_empty_data());
    }
}
