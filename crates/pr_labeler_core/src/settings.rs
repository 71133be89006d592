//! Run settings and the repository the run operates on.
//!
//! Inputs arrive as strings from the host (GitHub Actions exposes them as `INPUT_*`
//! environment variables). They are validated once, at startup, into [`LabelerSettings`]
//! and a [`RunContext`].

use crate::errors::ConfigError;

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;

/// Default location of the label configuration within the repository.
pub const DEFAULT_CONFIGURATION_PATH: &str = ".github/pr-labeler.yml";

pub const INPUT_REPO_TOKEN: &str = "repo-token";
pub const INPUT_CONFIGURATION_PATH: &str = "configuration-path";
pub const INPUT_SKIP_LABELED_PRS: &str = "skip-labeled-prs";
pub const INPUT_OPERATIONS_PER_RUN: &str = "operations-per-run";

/// The repository a run operates on.
///
/// Passed explicitly to every remote call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    pub owner: String,
    pub repo: String,
    /// The commit the label configuration is read from. `None` reads the default branch.
    pub reference: Option<String>,
}

impl RunContext {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            reference: None,
        }
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Builds a context from an `owner/name` string such as `GITHUB_REPOSITORY`.
    ///
    /// An empty `reference` is treated as absent.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidRepository` unless `full_name` has exactly one `/`
    /// with text on both sides.
    pub fn from_repository(full_name: &str, reference: Option<&str>) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidRepository {
            value: full_name.to_string(),
        };

        let (owner, repo) = full_name.trim().split_once('/').ok_or_else(invalid)?;
        if owner.is_empty() || repo.is_empty() || repo.contains('/') {
            return Err(invalid());
        }

        let context = Self::new(owner, repo);
        Ok(match reference.map(str::trim).filter(|r| !r.is_empty()) {
            Some(reference) => context.with_reference(reference),
            None => context,
        })
    }
}

/// Validated behaviour settings for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelerSettings {
    /// Path of the label configuration file within the repository.
    pub configuration_path: String,
    /// Leave pull requests that already carry a label alone.
    pub skip_labeled_prs: bool,
    /// Maximum number of remote calls the run may make.
    pub operations_per_run: i64,
}

impl LabelerSettings {
    /// Validates the raw input strings.
    ///
    /// # Errors
    ///
    /// - `ConfigError::MissingInput` if `skip-labeled-prs` or `operations-per-run` is absent
    /// - `ConfigError::InvalidInteger` if `operations-per-run` does not start with an integer
    pub fn from_inputs(
        configuration_path: Option<&str>,
        skip_labeled_prs: Option<&str>,
        operations_per_run: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let configuration_path = configuration_path
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .unwrap_or(DEFAULT_CONFIGURATION_PATH)
            .to_string();

        let skip_labeled_prs =
            parse_flag(require_input(INPUT_SKIP_LABELED_PRS, skip_labeled_prs)?);

        let operations_per_run = parse_integer_input(
            INPUT_OPERATIONS_PER_RUN,
            require_input(INPUT_OPERATIONS_PER_RUN, operations_per_run)?,
        )?;

        Ok(Self {
            configuration_path,
            skip_labeled_prs,
            operations_per_run,
        })
    }
}

/// Returns the trimmed value of a required input.
///
/// # Errors
///
/// Returns `ConfigError::MissingInput` if the value is absent or blank.
pub fn require_input<'a>(name: &str, value: Option<&'a str>) -> Result<&'a str, ConfigError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ConfigError::MissingInput {
            name: name.to_string(),
        })
}

/// Parses an integer input from its leading digits.
///
/// Leading whitespace and a sign are allowed and anything after the digits is ignored, so
/// `"30 calls"` reads as 30 and `"3.5"` as 3. A `0x` prefix selects hexadecimal.
///
/// # Errors
///
/// Returns `ConfigError::InvalidInteger` if no digits follow the optional sign, or the
/// value does not fit in an `i64`.
pub fn parse_integer_input(name: &str, value: &str) -> Result<i64, ConfigError> {
    let invalid = || ConfigError::InvalidInteger {
        name: name.to_string(),
        value: value.to_string(),
    };

    let text = value.trim_start();
    let (negative, text) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let (radix, text) = match text.get(..2) {
        Some("0x") | Some("0X") => (16, &text[2..]),
        _ => (10, text),
    };

    let digits_end = text
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(text.len());
    let digits = &text[..digits_end];
    if digits.is_empty() {
        return Err(invalid());
    }

    let magnitude = i64::from_str_radix(digits, radix).map_err(|_| invalid())?;
    Ok(if negative { -magnitude } else { magnitude })
}

/// Boolean inputs are on only when they read `true`, in any case.
pub fn parse_flag(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}
