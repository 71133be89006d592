//! Error types for GitHub client operations.
//!
//! This module defines the error types that can occur when interacting with the GitHub API
//! through the github_client crate. Every failed call is logged with its context before it
//! is converted into one of these variants, so the variants themselves stay small.

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur during GitHub client operations.
///
/// ## Examples
///
/// ```rust,ignore
/// use github_client::Error;
///
/// match client.list_changed_files("owner", "repo", 42).await {
///     Ok(files) => println!("{} files changed", files.len()),
///     Err(Error::NotFound) => eprintln!("Pull request does not exist"),
///     Err(Error::RateLimitExceeded) => eprintln!("Rate limit exceeded, try again later"),
///     Err(err) => eprintln!("Other error: {}", err),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A GitHub API request failed for a reason not covered by a more specific variant.
    ///
    /// The contained string is the message returned by GitHub or by the HTTP layer.
    #[error("API request failed: {0}")]
    ApiError(String),

    /// Authentication or GitHub client initialization failure.
    ///
    /// This error occurs when:
    /// - The token is invalid, expired or lacks the required scopes
    /// - The client could not be built (e.g. the API base URL is malformed)
    #[error("Failed to authenticate or initialize GitHub client: {0}")]
    AuthError(String),

    /// The GitHub API returned a response in an unexpected format.
    ///
    /// Raised when a response body cannot be deserialized into the expected model.
    #[error("Invalid response format")]
    InvalidResponse,

    /// The requested resource was not found.
    ///
    /// This error occurs when a GitHub API request returns a 404 status code,
    /// indicating that the requested resource (repository, file, pull request)
    /// does not exist or is not accessible with the current token.
    #[error("Resource not found")]
    NotFound,

    /// GitHub API rate limit has been exceeded.
    ///
    /// The labeler never retries; the next scheduled run picks up where this one failed.
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}
