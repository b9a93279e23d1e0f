//! Error types for the `triage-core` crate.

use thiserror::Error;

/// Errors that can occur while loading or querying the corpus.
#[derive(Debug, Error)]
pub enum TriageError {
    /// The source table could not be read.
    #[error("I/O error reading corpus source: {0}")]
    Io(#[from] std::io::Error),

    /// The source table is structurally invalid.
    ///
    /// Raised for a missing required column, a malformed or negative
    /// association strength, an empty identifier, or a disease whose total
    /// weight is zero. Fatal to loading: no partial corpus is ever produced.
    #[error("data format error: {0}")]
    DataFormat(String),

    /// A caller reported a symptom that is not in the corpus universe.
    ///
    /// Recoverable: the request is rejected as-is, the corpus is untouched.
    #[error("unknown symptom: '{0}'")]
    InvalidObservation(String),

    /// A configuration validation error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// A convenience result type for triage operations.
pub type Result<T> = std::result::Result<T, TriageError>;
