//! Error taxonomy shared by generators, the registry and distributions.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StochasticError>;

/// Errors that can occur while drawing, serializing or configuring.
///
/// Every variant is raised at the point of detection and surfaced to the
/// immediate caller. A failed call leaves the receiver untouched.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StochasticError {
    /// A constructor or mutator received an unusable argument, or a
    /// capability precondition was not met.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A distribution parameter failed its validity predicate.
    #[error("Invalid value {value} for parameter '{name}'")]
    InvalidParameter { name: &'static str, value: f64 },

    /// A capability-gated operation was invoked without the capability, or
    /// an attribute is undefined for the current configuration.
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// Serialized data named a tag that was never registered.
    #[error("Unknown tag: {0}")]
    UnknownTag(String),

    /// Serialized data is missing a delimiter or carries a truncated or
    /// incompatible payload.
    #[error("Malformed data: {0}")]
    MalformedData(String),
}

impl StochasticError {
    pub(crate) fn unsupported(what: impl Into<String>) -> Self {
        StochasticError::UnsupportedOperation(what.into())
    }

    pub(crate) fn malformed(what: impl Into<String>) -> Self {
        StochasticError::MalformedData(what.into())
    }
}
