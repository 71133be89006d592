//! Connects validated inputs to a labeler run against GitHub.

use github_client::{create_token_client, GitHubClient};
use pr_labeler_core::{Labeler, RunSummary};
use tracing::info;

use crate::config::ValidatedInputs;
use crate::errors::Error;

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;

/// Runs the labeler once for the repository named in `inputs`.
///
/// # Errors
///
/// Returns `Error::Client` if the GitHub client cannot be built, `Error::Config` for an
/// invalid label configuration and `Error::Run` if a GitHub call fails.
pub async fn execute(inputs: &ValidatedInputs) -> Result<RunSummary, Error> {
    info!(
        owner = inputs.context.owner.as_str(),
        repo = inputs.context.repo.as_str(),
        configuration_path = inputs.settings.configuration_path.as_str(),
        operations_per_run = inputs.settings.operations_per_run,
        skip_labeled_prs = inputs.settings.skip_labeled_prs,
        "Starting pull request labeler"
    );

    let octocrab = create_token_client(&inputs.repo_token, Some(&inputs.api_url))?;
    let client = GitHubClient::new(octocrab);

    let summary = Labeler::new(&client, &inputs.context, &inputs.settings)
        .run()
        .await?;
    Ok(summary)
}
