//! Process inputs for the pr-labeler binary.
//!
//! Every input can be passed as a command line flag or through the environment variables
//! GitHub Actions sets for a workflow step (`INPUT_<NAME>` plus the default `GITHUB_*`
//! variables). The raw strings are validated in one place, [`Inputs::validate`], before
//! anything talks to GitHub.

use clap::Parser;
use github_client::DEFAULT_API_URL;
use pr_labeler_core::settings::{require_input, INPUT_REPO_TOKEN};
use pr_labeler_core::{LabelerSettings, RunContext};

use crate::errors::Error;

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Label open pull requests by the files they change.
#[derive(Parser, Clone)]
#[command(name = "pr-labeler")]
#[command(about = "Label open pull requests by the files they change", long_about = None)]
#[command(version)]
pub struct Inputs {
    /// Token used to call the GitHub API
    #[arg(long = "repo-token", env = "INPUT_REPO-TOKEN", hide_env_values = true)]
    pub repo_token: Option<String>,

    /// Path of the label configuration file within the repository
    #[arg(long = "configuration-path", env = "INPUT_CONFIGURATION-PATH")]
    pub configuration_path: Option<String>,

    /// Leave pull requests that already have a label alone ("true" to enable)
    #[arg(long = "skip-labeled-prs", env = "INPUT_SKIP-LABELED-PRS")]
    pub skip_labeled_prs: Option<String>,

    /// Maximum number of GitHub API calls per run
    #[arg(
        long = "operations-per-run",
        env = "INPUT_OPERATIONS-PER-RUN",
        allow_hyphen_values = true
    )]
    pub operations_per_run: Option<String>,

    /// Repository to label, as owner/name
    #[arg(long, env = "GITHUB_REPOSITORY")]
    pub repository: Option<String>,

    /// Commit to read the label configuration from
    #[arg(long = "ref", env = "GITHUB_SHA")]
    pub reference: Option<String>,

    /// GitHub REST API endpoint
    #[arg(long = "api-url", env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,
}

/// Inputs that passed validation.
#[derive(Clone)]
pub struct ValidatedInputs {
    pub repo_token: String,
    pub api_url: String,
    pub context: RunContext,
    pub settings: LabelerSettings,
}

impl Inputs {
    /// Checks that required inputs are present and well formed.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` naming the first input that is missing or invalid.
    pub fn validate(&self) -> Result<ValidatedInputs, Error> {
        let repo_token = require_input(INPUT_REPO_TOKEN, self.repo_token.as_deref())?.to_string();

        let settings = LabelerSettings::from_inputs(
            self.configuration_path.as_deref(),
            self.skip_labeled_prs.as_deref(),
            self.operations_per_run.as_deref(),
        )?;

        let repository = require_input("repository", self.repository.as_deref())?;
        let context = RunContext::from_repository(repository, self.reference.as_deref())?;

        Ok(ValidatedInputs {
            repo_token,
            api_url: self.api_url.trim().to_string(),
            context,
            settings,
        })
    }
}
