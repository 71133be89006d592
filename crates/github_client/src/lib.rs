//! Crate for interacting with the GitHub REST API.
//!
//! This crate provides the remote operations the pull request labeler depends on: reading a
//! file from a repository, listing open pull requests, listing the files changed by a pull
//! request and adding labels to a pull request. The operations are exposed through the
//! [`PullRequestClient`] trait so that callers can substitute their own implementation in
//! tests.

use async_trait::async_trait;
use octocrab::{Octocrab, Result as OctocrabResult};
use serde::Serialize;
use tracing::{debug, error, info, instrument};

pub mod errors;
pub use errors::Error;

pub mod models;
pub use models::{FileContents, Label, PullRequestSummary};

// Reference the tests module in the separate file
#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// The default GitHub REST API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// The largest page size the GitHub list endpoints accept.
pub const MAX_PAGE_SIZE: u8 = 100;

/// Trait for the pull request operations used by the labeler.
///
/// Every method maps to exactly one REST call. Implementations must not retry or page
/// internally, callers account for each invocation as a single remote operation.
#[async_trait]
pub trait PullRequestClient: Send + Sync {
    /// Reads a single file from a repository.
    ///
    /// # Arguments
    ///
    /// * `owner` - The owner of the repository (user or organization name).
    /// * `repo` - The name of the repository.
    /// * `path` - The path of the file within the repository.
    /// * `reference` - The commit, branch or tag to read from. Uses the default branch when `None`.
    ///
    /// # Errors
    /// Returns `Error::NotFound` if the file does not exist at the given reference.
    async fn get_file_contents(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        reference: Option<&str>,
    ) -> Result<FileContents, Error>;

    /// Lists one page of open pull requests, most recently updated first.
    ///
    /// Pages are 1-based. A page past the last pull request is empty.
    async fn list_open_pull_requests(
        &self,
        owner: &str,
        repo: &str,
        page: u32,
        per_page: u8,
    ) -> Result<Vec<PullRequestSummary>, Error>;

    /// Lists the paths of the files changed by a pull request.
    async fn list_changed_files(
        &self,
        owner: &str,
        repo: &str,
        pull_number: u64,
    ) -> Result<Vec<String>, Error>;

    /// Adds labels to a pull request.
    ///
    /// The operation is additive. Labels already present on the pull request are left as
    /// they are and labels that do not exist in the repository yet are created by GitHub.
    async fn add_labels(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u64,
        labels: &[String],
    ) -> Result<(), Error>;
}

/// A client for interacting with the GitHub API.
#[derive(Debug)]
pub struct GitHubClient {
    client: Octocrab,
}

impl GitHubClient {
    /// Creates a new `GitHubClient` from an authenticated `Octocrab` instance.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use github_client::{create_token_client, GitHubClient};
    ///
    /// # fn example() -> Result<(), github_client::Error> {
    /// let octocrab = create_token_client("ghp_example", None)?;
    /// let client = GitHubClient::new(octocrab);
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(client: Octocrab) -> Self {
        Self { client }
    }
}

#[derive(Debug, Serialize)]
struct ContentsQuery<'a> {
    #[serde(rename = "ref")]
    reference: &'a str,
}

#[derive(Debug, Serialize)]
struct ChangedFilesQuery {
    per_page: u8,
}

#[async_trait]
impl PullRequestClient for GitHubClient {
    #[instrument(skip(self), fields(owner = %owner, repo = %repo, path = %path))]
    async fn get_file_contents(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        reference: Option<&str>,
    ) -> Result<FileContents, Error> {
        let route = format!(
            "/repos/{}/{}/contents/{}",
            owner,
            repo,
            path.trim_start_matches('/')
        );
        debug!("Making API call to: {}", route);

        let response: OctocrabResult<FileContents> = match reference {
            Some(reference) => {
                self.client
                    .get(route, Some(&ContentsQuery { reference }))
                    .await
            }
            None => self.client.get(route, None::<&()>).await,
        };

        response.map_err(|e| map_octocrab_error("Failed to get file contents", e))
    }

    #[instrument(skip(self), fields(owner = %owner, repo = %repo))]
    async fn list_open_pull_requests(
        &self,
        owner: &str,
        repo: &str,
        page: u32,
        per_page: u8,
    ) -> Result<Vec<PullRequestSummary>, Error> {
        let route = format!("/repos/{}/{}/pulls", owner, repo);
        let query = models::ListPullRequestsQuery {
            state: "open",
            sort: "updated",
            direction: "desc",
            per_page,
            page,
        };

        let response: OctocrabResult<Vec<PullRequestSummary>> =
            self.client.get(route, Some(&query)).await;
        match response {
            Ok(prs) => {
                info!(page, count = prs.len(), "Retrieved page of open pull requests");
                Ok(prs)
            }
            Err(e) => Err(map_octocrab_error("Failed to list pull requests", e)),
        }
    }

    #[instrument(skip(self), fields(owner = %owner, repo = %repo))]
    async fn list_changed_files(
        &self,
        owner: &str,
        repo: &str,
        pull_number: u64,
    ) -> Result<Vec<String>, Error> {
        let route = format!("/repos/{}/{}/pulls/{}/files", owner, repo, pull_number);
        let query = ChangedFilesQuery {
            per_page: MAX_PAGE_SIZE,
        };

        let response: OctocrabResult<Vec<models::ChangedFile>> =
            self.client.get(route, Some(&query)).await;
        match response {
            Ok(files) => Ok(files.into_iter().map(|f| f.filename).collect()),
            Err(e) => Err(map_octocrab_error("Failed to list changed files", e)),
        }
    }

    #[instrument(skip(self), fields(owner = %owner, repo = %repo))]
    async fn add_labels(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u64,
        labels: &[String],
    ) -> Result<(), Error> {
        let route = format!("/repos/{}/{}/issues/{}/labels", owner, repo, issue_number);
        let payload = models::AddLabelsPayload { labels };

        let response: OctocrabResult<Vec<Label>> = self.client.post(route, Some(&payload)).await;
        match response {
            Ok(current) => {
                info!(
                    issue_number,
                    label_count = current.len(),
                    "Added labels to pull request"
                );
                Ok(())
            }
            Err(e) => Err(map_octocrab_error("Failed to add labels", e)),
        }
    }
}

/// Creates an `Octocrab` client authenticated with a personal access or installation token.
///
/// # Arguments
///
/// * `token` - The token to authenticate with, e.g. the workflow's `GITHUB_TOKEN`.
/// * `base_uri` - The API endpoint. Uses [`DEFAULT_API_URL`] when `None`, pass the
///   `GITHUB_API_URL` value to talk to a GitHub Enterprise Server.
///
/// # Errors
///
/// Returns an `Error::AuthError` if the base URI is malformed or the client cannot be built.
#[instrument(skip(token))]
pub fn create_token_client(token: &str, base_uri: Option<&str>) -> Result<Octocrab, Error> {
    let mut builder = Octocrab::builder().personal_token(token.to_string());

    if let Some(uri) = base_uri {
        builder = builder.base_uri(uri).map_err(|e| {
            error!(base_uri = uri, error = %e, "Invalid GitHub API base URI");
            Error::AuthError(format!("Invalid GitHub API base URI '{}': {}", uri, e))
        })?;
    }

    builder.build().map_err(|e| {
        error!(error = ?e, "Failed to build Octocrab client with token credentials");
        Error::AuthError(format!("Failed to build the GitHub client: {}", e))
    })
}

fn classify_status(status: http::StatusCode, message: &str) -> Error {
    match status {
        http::StatusCode::NOT_FOUND => Error::NotFound,
        http::StatusCode::TOO_MANY_REQUESTS => Error::RateLimitExceeded,
        http::StatusCode::FORBIDDEN if message.to_lowercase().contains("rate limit") => {
            Error::RateLimitExceeded
        }
        http::StatusCode::UNAUTHORIZED | http::StatusCode::FORBIDDEN => {
            Error::AuthError(message.to_string())
        }
        _ => Error::ApiError(format!("{} ({})", message, status)),
    }
}

fn map_octocrab_error(message: &str, e: octocrab::Error) -> Error {
    match e {
        octocrab::Error::GitHub { source, backtrace } => {
            error!(
                status = source.status_code.as_u16(),
                error_message = %source.message,
                backtrace = backtrace.to_string(),
                "{}. Received an error from GitHub",
                message
            );
            classify_status(source.status_code, &source.message)
        }
        octocrab::Error::Serde { source, .. } => {
            error!(
                error_message = source.to_string(),
                "{}. The response could not be deserialized.", message
            );
            Error::InvalidResponse
        }
        octocrab::Error::Json { source, .. } => {
            error!(
                error_message = source.to_string(),
                "{}. The response could not be deserialized.", message
            );
            Error::InvalidResponse
        }
        octocrab::Error::UriParse { source, backtrace } => {
            error!(
                error_message = source.to_string(),
                backtrace = backtrace.to_string(),
                "{}. Failed to parse URI.",
                message
            );
            Error::ApiError(source.to_string())
        }
        _ => {
            error!(error_message = e.to_string(), "{}", message);
            Error::ApiError(e.to_string())
        }
    }
}
