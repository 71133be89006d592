//! GitHub Actions workflow commands.
//!
//! Lines printed to stdout in the `::command::message` form are picked up by the Actions
//! runner and shown as annotations on the workflow run.

#[cfg(test)]
#[path = "workflow_tests.rs"]
mod tests;

/// Formats a warning annotation.
pub fn warning(message: &str) -> String {
    format!("::warning::{}", escape_data(message))
}

/// Formats an error annotation. The runner marks the step as failed once the
/// process exits with a non-zero status.
pub fn error(message: &str) -> String {
    format!("::error::{}", escape_data(message))
}

fn escape_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
