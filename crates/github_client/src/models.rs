//! # Models
//!
//! Data models returned by the pull request and contents endpoints.
//!
//! Only the fields the labeler needs are deserialized. GitHub sends much larger payloads,
//! unknown fields are ignored.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;

/// Represents a label on a pull request or issue.
///
/// # Examples
///
/// ```
/// use github_client::models::Label;
///
/// let label = Label {
///     name: "bug".to_string(),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    /// The name of the label
    pub name: String,
}

/// An open pull request as returned by the pull request list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestSummary {
    /// The pull request number, shared with the issue of the same number
    pub number: u64,

    /// The title of the pull request
    #[serde(default)]
    pub title: String,

    /// Labels currently applied to the pull request
    #[serde(default)]
    pub labels: Vec<Label>,
}

impl PullRequestSummary {
    /// Creates a summary with the given labels.
    pub fn new(number: u64, title: impl Into<String>, labels: &[&str]) -> Self {
        Self {
            number,
            title: title.into(),
            labels: labels
                .iter()
                .map(|name| Label {
                    name: name.to_string(),
                })
                .collect(),
        }
    }

    /// Returns the names of the labels currently applied to the pull request.
    pub fn label_names(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(|l| l.name.as_str())
    }

    /// Returns `true` if the pull request carries at least one label.
    pub fn is_labeled(&self) -> bool {
        !self.labels.is_empty()
    }
}

/// The content of a single file as returned by the contents endpoint.
///
/// `content` is encoded according to `encoding`. For regular files GitHub uses
/// `base64`, with a line break every 60 characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileContents {
    /// The (possibly encoded) file content
    #[serde(default)]
    pub content: String,

    /// The encoding of `content`, e.g. `base64`
    #[serde(default)]
    pub encoding: String,
}

/// A file entry from the pull request files endpoint.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ChangedFile {
    pub filename: String,
}

/// Request body for adding labels to an issue or pull request.
#[derive(Debug, Serialize)]
pub(crate) struct AddLabelsPayload<'a> {
    pub labels: &'a [String],
}

/// Query parameters for listing open pull requests.
#[derive(Debug, Serialize)]
pub(crate) struct ListPullRequestsQuery {
    pub state: &'static str,
    pub sort: &'static str,
    pub direction: &'static str,
    pub per_page: u8,
    pub page: u32,
}
