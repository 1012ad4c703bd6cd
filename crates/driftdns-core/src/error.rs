//! Error types for the reconciler
//!
//! One variant per step of a reconciliation pass, so callers can tell
//! "we don't know" (`Indeterminate`) apart from "we tried and failed"
//! (`UpdateRejected`).

use thiserror::Error;

/// Result type alias for reconciler operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the reconciler
#[derive(Error, Debug)]
pub enum Error {
    /// Address-echo service unreachable or answered with an error status
    #[error("network error: {0}")]
    Network(String),

    /// DNS query against the pinned resolver failed or returned no answer
    #[error("resolution error: {0}")]
    Resolution(String),

    /// Provider zone lookup unreachable or answered with an error status
    #[error("zone lookup error: {0}")]
    ZoneLookup(String),

    /// Provider rejected or failed the record upsert
    #[error("update rejected: {0}")]
    UpdateRejected(String),

    /// An input was present but unusable (empty or malformed)
    #[error("indeterminate input: {0}")]
    Indeterminate(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create a resolution error
    pub fn resolution(msg: impl Into<String>) -> Self {
        Self::Resolution(msg.into())
    }

    /// Create a zone lookup error
    pub fn zone_lookup(msg: impl Into<String>) -> Self {
        Self::ZoneLookup(msg.into())
    }

    /// Create an update-rejected error
    pub fn update_rejected(msg: impl Into<String>) -> Self {
        Self::UpdateRejected(msg.into())
    }

    /// Create an indeterminate-input error
    pub fn indeterminate(msg: impl Into<String>) -> Self {
        Self::Indeterminate(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Helper for converting anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}
