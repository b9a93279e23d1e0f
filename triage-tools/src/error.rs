//! Error types for the `triage-tools` crate.

use thiserror::Error;
use triage_core::TriageError;

/// Errors that can occur while dispatching or executing a tool.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool name is not part of the dispatch table.
    #[error("unknown tool: '{0}'")]
    UnknownTool(String),

    /// The argument object did not match the tool's schema.
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// An error propagated from the ranking core.
    #[error(transparent)]
    Core(#[from] TriageError),

    /// A filesystem failure while persisting output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A result could not be serialized to JSON.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ToolError {
    /// Whether the failure is the caller's fault (bad tool name, bad
    /// arguments, unknown symptom) rather than an internal one. Transports
    /// map this to their 4xx/5xx split.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            ToolError::UnknownTool(_)
                | ToolError::InvalidArguments(_)
                | ToolError::Core(TriageError::InvalidObservation(_))
        )
    }
}

/// A convenience result type for tool operations.
pub type Result<T> = std::result::Result<T, ToolError>;
