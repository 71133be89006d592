//! Label decisions for a single pull request.

use std::collections::BTreeSet;

use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

use crate::rules::RuleMapping;

#[cfg(test)]
#[path = "decision_tests.rs"]
mod tests;

/// Computes the labels whose patterns match at least one changed file.
///
/// The result is always a subset of the labels in `rules`. Pattern and file order only
/// affect how quickly a match is found, never the result.
///
/// # Examples
///
/// ```
/// use pr_labeler_core::{decide, RuleMapping};
///
/// let rules = RuleMapping::from_pairs([("docs", vec!["*.md"])]).unwrap();
/// let labels = decide(&["README.md".to_string()], &rules);
///
/// assert!(labels.contains("docs"));
/// ```
pub fn decide<S: AsRef<str>>(changed_files: &[S], rules: &RuleMapping) -> BTreeSet<String> {
    rules
        .iter()
        .filter(|rule| rule.matches_any(changed_files))
        .map(|rule| rule.label().to_string())
        .collect()
}

/// Folds a label name for comparison.
///
/// The name is decomposed (NFD), combining marks are dropped and the remainder is
/// lowercased, so `Résumé`, `RESUME` and `resume` all fold to `resume`.
pub fn fold_label_name(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Returns `true` if every desired label is already present, comparing folded names.
pub fn is_subset_of_existing<'a, D, E>(desired: D, existing: E) -> bool
where
    D: IntoIterator<Item = &'a str>,
    E: IntoIterator<Item = &'a str>,
{
    let existing: BTreeSet<String> = existing.into_iter().map(fold_label_name).collect();
    desired
        .into_iter()
        .all(|label| existing.contains(&fold_label_name(label)))
}
