//! Error types for the labeler.
//!
//! Two kinds of failure abort a run: invalid configuration ([`ConfigError`]) and a failed
//! remote call ([`LabelerError::RemoteCall`]). Running out of operation budget is not an
//! error, it is reported through [`crate::RunOutcome::BudgetExhausted`].

use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Invalid inputs or label rule configuration.
///
/// Raised before any pull request is processed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Failed to parse label configuration: {reason}")]
    InvalidYaml { reason: String },

    #[error("Label configuration must be a mapping from label name to glob patterns")]
    NotAMapping,

    #[error("Found unsupported key in label configuration: {key} (label names must be scalars)")]
    InvalidLabelKey { key: String },

    #[error("Found unexpected type for label {label} (should be string or array of globs)")]
    InvalidLabelValue { label: String },

    #[error("Label {label} is defined more than once")]
    DuplicateLabel { label: String },

    #[error("Label {label} has an empty list of globs")]
    EmptyPatternList { label: String },

    #[error("Failed to decode label configuration contents: {reason}")]
    UndecodableContent { reason: String },

    #[error("Input required and not supplied: {name}")]
    MissingInput { name: String },

    #[error("Input {name} did not parse to a valid integer: '{value}'")]
    InvalidInteger { name: String, value: String },

    #[error("Repository must be given as 'owner/name', got '{value}'")]
    InvalidRepository { value: String },
}

/// Errors that abort a labeler run.
#[derive(Error, Debug)]
pub enum LabelerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Remote call failed while trying to {operation}: {source}")]
    RemoteCall {
        operation: String,
        #[source]
        source: github_client::Error,
    },
}

impl LabelerError {
    /// Wraps a GitHub client error with a description of the operation that failed.
    pub fn remote(operation: impl Into<String>, source: github_client::Error) -> Self {
        Self::RemoteCall {
            operation: operation.into(),
            source,
        }
    }
}

/// Result type alias for labeler operations.
pub type LabelerResult<T> = Result<T, LabelerError>;
