//! Shell-style glob matching for changed file paths.
//!
//! Patterns use the usual shell semantics:
//!
//! - `*` matches any run of characters except `/`
//! - `**` matches across directory separators (`src/**/*.rs`)
//! - `?` matches a single character
//! - `[abc]`, `[a-z]` and `[!abc]` match character classes
//! - `{md,txt}` matches any of the comma separated alternatives
//!
//! A path component starting with `.` is hidden. Wildcards never match it, only a pattern
//! component that itself starts with a literal `.` does. So `*` does not match `.gitignore`
//! and `**/*.yml` does not reach into `.github/`, while `.github/**` does.
//!
//! A pattern that cannot be compiled never matches anything. The labeler logs a warning
//! for it once, when the rule mapping is built, instead of failing the run.

use globset::{GlobBuilder, GlobMatcher};
use std::fmt;
use tracing::warn;

#[cfg(test)]
#[path = "glob_tests.rs"]
mod tests;

/// One `/`-separated component of a pattern.
#[derive(Clone)]
enum Segment {
    /// `**`: zero or more path components, none of them hidden.
    AnyDepth,
    Component {
        matcher: GlobMatcher,
        /// The component starts with a literal `.` and may match hidden components.
        literal_dot: bool,
    },
}

/// A compiled glob pattern.
///
/// The pattern text is kept so that it can be logged and compared.
#[derive(Clone)]
pub struct GlobPattern {
    source: String,
    /// One segment list per brace alternative. `None` if the pattern is invalid.
    alternatives: Option<Vec<Vec<Segment>>>,
}

impl GlobPattern {
    /// Compiles a pattern. Invalid patterns produce a `GlobPattern` that matches nothing.
    pub fn new(pattern: impl Into<String>) -> Self {
        let source = pattern.into();
        let alternatives = match compile(&source) {
            Ok(alternatives) => Some(alternatives),
            Err(e) => {
                warn!(
                    pattern = source.as_str(),
                    error = %e,
                    "Invalid glob pattern, it will never match"
                );
                None
            }
        };

        Self {
            source,
            alternatives,
        }
    }

    /// The pattern text as written in the configuration.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns `false` if the pattern failed to compile.
    pub fn is_valid(&self) -> bool {
        self.alternatives.is_some()
    }

    /// Returns `true` if `path` matches the pattern.
    pub fn is_match(&self, path: &str) -> bool {
        let Some(alternatives) = &self.alternatives else {
            return false;
        };

        let components: Vec<&str> = path.split('/').collect();
        alternatives
            .iter()
            .any(|segments| match_segments(segments, &components))
    }
}

impl fmt::Debug for GlobPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlobPattern")
            .field("source", &self.source)
            .field("valid", &self.is_valid())
            .finish()
    }
}

impl PartialEq for GlobPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for GlobPattern {}

/// Returns `true` if `path` matches the glob `pattern`.
///
/// Compiles the pattern on every call. Use [`GlobPattern`] when the same pattern is
/// checked against many paths.
///
/// # Examples
///
/// ```
/// use pr_labeler_core::glob::matches;
///
/// assert!(matches("*.md", "README.md"));
/// assert!(!matches("*.md", "docs/guide.md"));
/// assert!(matches("**/*.md", "docs/guide.md"));
/// assert!(!matches("*", ".gitignore"));
/// ```
pub fn matches(pattern: &str, path: &str) -> bool {
    GlobPattern::new(pattern).is_match(path)
}

fn compile(pattern: &str) -> Result<Vec<Vec<Segment>>, globset::Error> {
    expand_braces(pattern)
        .iter()
        .map(|alternative| compile_segments(alternative))
        .collect()
}

fn compile_segments(pattern: &str) -> Result<Vec<Segment>, globset::Error> {
    let mut segments = Vec::new();
    for component in pattern.split('/') {
        if component == "**" {
            // Consecutive globstars behave like one.
            if !matches!(segments.last(), Some(Segment::AnyDepth)) {
                segments.push(Segment::AnyDepth);
            }
            continue;
        }

        let matcher = GlobBuilder::new(component)
            .literal_separator(true)
            .backslash_escape(true)
            .build()?
            .compile_matcher();
        segments.push(Segment::Component {
            matcher,
            literal_dot: component.starts_with('.') || component.starts_with("\\."),
        });
    }
    Ok(segments)
}

fn match_segments(segments: &[Segment], components: &[&str]) -> bool {
    match segments.split_first() {
        None => components.is_empty(),
        Some((Segment::AnyDepth, rest)) => {
            for consumed in 0..=components.len() {
                if match_segments(rest, &components[consumed..]) {
                    return true;
                }
                if components.get(consumed).is_some_and(|c| is_hidden(c)) {
                    return false;
                }
            }
            false
        }
        Some((
            Segment::Component {
                matcher,
                literal_dot,
            },
            rest,
        )) => match components.split_first() {
            Some((component, remaining)) => {
                (*literal_dot || !is_hidden(component))
                    && matcher.is_match(component)
                    && match_segments(rest, remaining)
            }
            None => false,
        },
    }
}

fn is_hidden(component: &str) -> bool {
    component.starts_with('.')
}

/// Expands brace groups into the full list of alternatives, outermost group first.
///
/// `a/{b,c{d,e}}.rs` yields `a/b.rs`, `a/cd.rs` and `a/ce.rs`. Unbalanced braces and
/// groups without a comma are left in place.
fn expand_braces(pattern: &str) -> Vec<String> {
    let Some((open, commas, close)) = find_brace_group(pattern) else {
        return vec![pattern.to_string()];
    };

    let prefix = &pattern[..open];
    let suffix = &pattern[close + 1..];
    let mut bounds = Vec::with_capacity(commas.len() + 2);
    bounds.push(open);
    bounds.extend(commas);
    bounds.push(close);

    bounds
        .windows(2)
        .flat_map(|w| {
            let choice = &pattern[w[0] + 1..w[1]];
            expand_braces(&format!("{prefix}{choice}{suffix}"))
        })
        .collect()
}

/// Finds the first top-level brace group that has at least one top-level comma.
///
/// Returns the byte offsets of the opening brace, the separating commas and the closing brace.
fn find_brace_group(pattern: &str) -> Option<(usize, Vec<usize>, usize)> {
    let mut escaped = false;
    let mut open_groups: Vec<(usize, Vec<usize>)> = Vec::new();

    for (i, c) in pattern.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '{' => open_groups.push((i, Vec::new())),
            ',' => {
                if let Some((_, commas)) = open_groups.last_mut() {
                    commas.push(i);
                }
            }
            '}' => {
                if let Some((open, commas)) = open_groups.pop() {
                    if open_groups.is_empty() && !commas.is_empty() {
                        return Some((open, commas, i));
                    }
                }
            }
            _ => {}
        }
    }
    None
}
