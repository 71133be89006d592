//! Label rule configuration.
//!
//! The configuration file is YAML. Every top-level key names a label, its value is either
//! a single glob or a list of globs:
//!
//! ```yaml
//! docs: "*.md"
//! backend:
//!   - "src/**/*.go"
//!   - "src/**/*.rs"
//! ```
//!
//! [`parse`] turns that text into a [`RuleMapping`]. The untyped YAML value never leaves
//! this module.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use github_client::FileContents;
use serde_yaml::Value;
use tracing::debug;

use crate::errors::ConfigError;
use crate::glob::GlobPattern;

#[cfg(test)]
#[path = "rules_tests.rs"]
mod tests;

/// A label and the globs that trigger it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelRule {
    label: String,
    patterns: Vec<GlobPattern>,
}

impl LabelRule {
    /// The label applied when any pattern matches.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The compiled patterns, in configuration order. Never empty.
    pub fn patterns(&self) -> &[GlobPattern] {
        &self.patterns
    }

    /// Returns `true` if any pattern matches any of the given paths.
    pub fn matches_any<S: AsRef<str>>(&self, paths: &[S]) -> bool {
        self.patterns.iter().any(|pattern| {
            debug!(label = self.label.as_str(), pattern = pattern.as_str(), "Checking pattern");
            paths.iter().any(|path| {
                let path = path.as_ref();
                let matched = pattern.is_match(path);
                if matched {
                    debug!(
                        label = self.label.as_str(),
                        pattern = pattern.as_str(),
                        path,
                        "Changed file matches"
                    );
                }
                matched
            })
        })
    }
}

/// The parsed label configuration: an ordered list of labels with unique names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleMapping {
    rules: Vec<LabelRule>,
}

impl RuleMapping {
    /// Builds a mapping from `(label, patterns)` pairs.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::EmptyPatternList` for a label without patterns and
    /// `ConfigError::DuplicateLabel` if a label appears twice.
    pub fn from_pairs<L, I, P>(pairs: impl IntoIterator<Item = (L, I)>) -> Result<Self, ConfigError>
    where
        L: Into<String>,
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        let mut mapping = Self::default();
        for (label, patterns) in pairs {
            let patterns = patterns.into_iter().map(Into::into).collect();
            mapping.insert(label.into(), patterns)?;
        }
        Ok(mapping)
    }

    fn insert(&mut self, label: String, patterns: Vec<String>) -> Result<(), ConfigError> {
        if patterns.is_empty() {
            return Err(ConfigError::EmptyPatternList { label });
        }
        if self.get(&label).is_some() {
            return Err(ConfigError::DuplicateLabel { label });
        }

        self.rules.push(LabelRule {
            label,
            patterns: patterns.into_iter().map(GlobPattern::new).collect(),
        });
        Ok(())
    }

    /// Looks up the rule for a label by its exact name.
    pub fn get(&self, label: &str) -> Option<&LabelRule> {
        self.rules.iter().find(|r| r.label == label)
    }

    /// Iterates over the rules in configuration order.
    pub fn iter(&self) -> impl Iterator<Item = &LabelRule> {
        self.rules.iter()
    }

    /// The label names in configuration order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.label.as_str())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Parses label configuration text into a [`RuleMapping`].
///
/// A string value becomes a single pattern, a list of strings is used as is. An empty
/// document yields an empty mapping, which never applies any label.
///
/// # Errors
///
/// - `ConfigError::InvalidYaml` if the text is not valid YAML
/// - `ConfigError::NotAMapping` if the top level is not a mapping
/// - `ConfigError::InvalidLabelKey` if a key is not a scalar
/// - `ConfigError::InvalidLabelValue` if a value is neither a string nor a list of strings
/// - `ConfigError::EmptyPatternList` if a value is an empty list
/// - `ConfigError::DuplicateLabel` if two keys resolve to the same label name
pub fn parse(raw: &str) -> Result<RuleMapping, ConfigError> {
    if is_blank_document(raw) {
        return Ok(RuleMapping::default());
    }

    let document: Value = serde_yaml::from_str(raw).map_err(|e| ConfigError::InvalidYaml {
        reason: e.to_string(),
    })?;

    let entries = match document {
        Value::Null => return Ok(RuleMapping::default()),
        Value::Mapping(entries) => entries,
        _ => return Err(ConfigError::NotAMapping),
    };

    let mut mapping = RuleMapping::default();
    for (key, value) in entries {
        let label = label_name(&key)?;
        let patterns = label_patterns(&label, value)?;
        mapping.insert(label, patterns)?;
    }

    debug!(label_count = mapping.len(), "Parsed label configuration");
    Ok(mapping)
}

/// Decodes the payload of the contents endpoint into text.
///
/// # Errors
///
/// Returns `ConfigError::UndecodableContent` if the base64 payload is invalid or the
/// decoded bytes are not UTF-8.
pub fn decode_contents(contents: &FileContents) -> Result<String, ConfigError> {
    if !contents.encoding.eq_ignore_ascii_case("base64") {
        return Ok(contents.content.clone());
    }

    // GitHub wraps the base64 payload at 60 columns.
    let compact: String = contents
        .content
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    let bytes = STANDARD
        .decode(compact)
        .map_err(|e| ConfigError::UndecodableContent {
            reason: e.to_string(),
        })?;

    String::from_utf8(bytes).map_err(|e| ConfigError::UndecodableContent {
        reason: e.to_string(),
    })
}

fn is_blank_document(raw: &str) -> bool {
    raw.lines().map(str::trim).all(|line| {
        line.is_empty() || line.starts_with('#') || line == "---" || line == "..."
    })
}

fn label_name(key: &Value) -> Result<String, ConfigError> {
    match key {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(ConfigError::InvalidLabelKey {
            key: format!("{:?}", other),
        }),
    }
}

fn label_patterns(label: &str, value: Value) -> Result<Vec<String>, ConfigError> {
    let invalid = || ConfigError::InvalidLabelValue {
        label: label.to_string(),
    };

    match value {
        Value::String(pattern) => Ok(vec![pattern]),
        Value::Sequence(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(pattern) => Ok(pattern),
                _ => Err(invalid()),
            })
            .collect(),
        _ => Err(invalid()),
    }
}
