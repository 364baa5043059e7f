//! Slug extraction and admission.

use regex::Regex;
use std::collections::HashSet;

/// Default shape of an admissible slug: alphanumeric words joined by single dashes.
pub const DEFAULT_SLUG_PATTERN: &str = r"(?i)^[a-z0-9]+(?:-[a-z0-9]+)*$";

/// Turns a raw request target into a candidate slug.
///
/// Strips exactly one leading and one trailing `/` from the whole target,
/// then drops everything from the first `?` or `#`. No percent-decoding is
/// applied.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize_path("/docs"), "docs");
/// assert_eq!(normalize_path("/docs/"), "docs");
/// assert_eq!(normalize_path("//docs"), "/docs");
/// assert_eq!(normalize_path("/docs?utm=1"), "docs");
/// ```
pub fn normalize_path(raw: &str) -> String {
    let trimmed = raw.strip_prefix('/').unwrap_or(raw);
    let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);

    let end = trimmed.find(['?', '#']).unwrap_or(trimmed.len());
    trimmed[..end].to_string()
}

/// Decides which slugs may reach the link store.
///
/// A slug is admitted only if it is non-empty, not reserved, and matches the
/// configured pattern. Reserved names are compared exactly.
#[derive(Debug, Clone)]
pub struct SlugPolicy {
    reserved: HashSet<String>,
    pattern: Regex,
}

impl SlugPolicy {
    /// Creates a policy from a reserved list and a regex pattern.
    ///
    /// # Errors
    ///
    /// Returns [`regex::Error`] if `pattern` does not compile.
    pub fn new<I, S>(reserved: I, pattern: &str) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self {
            reserved: reserved.into_iter().map(Into::into).collect(),
            pattern: Regex::new(pattern)?,
        })
    }

    /// Returns `true` when `slug` may be looked up: non-empty, not reserved
    /// (compared exactly as given) and matching the slug pattern.
    pub fn admits(&self, slug: &str) -> bool {
        !slug.is_empty() && !self.reserved.contains(slug) && self.pattern.is_match(slug)
    }
}

impl Default for SlugPolicy {
    fn default() -> Self {
        Self {
            reserved: HashSet::from(["dashboard".to_string()]),
            pattern: Regex::new(DEFAULT_SLUG_PATTERN).expect("default slug pattern compiles"),
        }
    }
}
