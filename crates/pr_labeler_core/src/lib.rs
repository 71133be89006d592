//! Core logic for labeling pull requests by the files they change.
//!
//! A run reads a YAML file that maps label names to glob patterns, walks the open pull
//! requests of a repository and adds every label with a pattern that matches at least one
//! changed file. The number of GitHub calls per run is bounded by an operation budget so
//! that a run never trips the API rate limit.
//!
//! The main entry point is [`Labeler`]. The pieces it is built from are usable on their own:
//!
//! - [`glob`] matches file paths against shell-style patterns
//! - [`rules`] parses the label configuration into a [`RuleMapping`]
//! - [`decide`] computes the labels for a list of changed files
//! - [`OperationBudget`] tracks the remaining remote calls

pub mod budget;
pub mod decision;
pub mod errors;
pub mod glob;
pub mod rules;
pub mod settings;
pub mod traversal;

pub use budget::OperationBudget;
pub use decision::{decide, fold_label_name, is_subset_of_existing};
pub use errors::{ConfigError, LabelerError, LabelerResult};
pub use glob::GlobPattern;
pub use rules::{LabelRule, RuleMapping};
pub use settings::{LabelerSettings, RunContext, DEFAULT_CONFIGURATION_PATH};
pub use traversal::{Labeler, RunOutcome, RunSummary, PAGE_SIZE};
