use pr_labeler_core::{ConfigError, LabelerError};
use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that end the pr-labeler process with a failure status.
#[derive(Error, Debug)]
pub enum Error {
    /// The inputs or the label configuration are invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The GitHub client could not be created.
    #[error("Failed to create GitHub client: {0}")]
    Client(#[from] github_client::Error),

    /// The labeler run failed.
    #[error(transparent)]
    Run(LabelerError),
}

impl From<LabelerError> for Error {
    fn from(value: LabelerError) -> Self {
        match value {
            LabelerError::Config(e) => Error::Config(e),
            other => Error::Run(other),
        }
    }
}
