//! Utility types for validation.

use std::collections::HashSet;

/// A set of names compared case-insensitively.
///
/// Used for matching dataset variable names, which are case-insensitive.
#[derive(Debug, Clone, Default)]
pub struct CaseInsensitiveSet {
    /// Uppercased names.
    inner: HashSet<String>,
}

impl CaseInsensitiveSet {
    /// Create a set from an iterator of strings.
    pub fn from_iter<I, S>(iter: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            inner: iter
                .into_iter()
                .map(|s| s.as_ref().to_uppercase())
                .collect(),
        }
    }

    /// Check if the set contains a value (case-insensitive).
    pub fn contains(&self, value: impl AsRef<str>) -> bool {
        self.inner.contains(&value.as_ref().to_uppercase())
    }
}
