//! Error types for appcenter-upload

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the upload pipeline and the service client
#[derive(Debug, Error)]
pub enum Error {
    /// A phase ran without an identifier an earlier phase should have set.
    ///
    /// This is a pipeline assembly bug, never a transient condition.
    #[error("{phase}: {field} cannot be missing")]
    MissingField {
        /// Phase that detected the fault
        phase: &'static str,
        /// Name of the absent field
        field: &'static str,
    },

    /// A remote phase call failed; `message` is the diagnostic line that was logged
    #[error("{message}")]
    Upload {
        /// Operator-facing summary, including the cause
        message: String,
        /// Underlying failure
        #[source]
        source: Box<Error>,
    },

    /// The service answered with a non-success status
    #[error("App Center API error: {0}")]
    ServiceApi(String),

    /// Transport failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Malformed payload
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Local file access failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No usable API token
    #[error("authentication error: {0}")]
    Auth(String),

    /// Invalid upload configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal invariant violated
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Whether this error is a precondition fault rather than a remote failure
    pub const fn is_precondition(&self) -> bool {
        matches!(self, Self::MissingField { .. })
    }
}
