//! Exact comparison of an extracted table of contents against a reference.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// The outcome of comparing an extracted TOC with a reference TOC.
///
/// The three lists are disjoint and free of duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// Entries present in both, in the extracted TOC's order.
    pub matched: Vec<String>,
    /// Reference entries absent from the extracted TOC, in reference order.
    pub missing: Vec<String>,
    /// Extracted entries absent from the reference, in extracted order.
    pub extra: Vec<String>,
}

impl ComparisonResult {
    /// Returns `true` if every reference entry was found.
    #[must_use]
    pub fn is_conformant(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Compares `actual` against `expected` as sets of exact strings.
///
/// No normalisation happens here. Entries should already be cleaned with
/// [`clean_toc_line`](crate::domain::header::clean_toc_line).
///
/// ```
/// use srs_inspector::domain::comparison::compare_toc;
///
/// let result = compare_toc(&["1. Intro"], &["1. Intro", "2. Scope", "3. References"]);
/// assert_eq!(result.matched, ["1. Intro"]);
/// assert_eq!(result.missing, ["2. Scope", "3. References"]);
/// assert!(result.extra.is_empty());
/// ```
#[must_use]
pub fn compare_toc<A, E>(actual: &[A], expected: &[E]) -> ComparisonResult
where
    A: AsRef<str>,
    E: AsRef<str>,
{
    let actual_set: HashSet<&str> = actual.iter().map(AsRef::as_ref).collect();
    let expected_set: HashSet<&str> = expected.iter().map(AsRef::as_ref).collect();

    let mut result = ComparisonResult::default();

    let mut seen = HashSet::new();
    for entry in actual.iter().map(AsRef::as_ref) {
        if !seen.insert(entry) {
            continue;
        }
        if expected_set.contains(entry) {
            result.matched.push(entry.to_string());
        } else {
            result.extra.push(entry.to_string());
        }
    }

    seen.clear();
    result.missing = expected
        .iter()
        .map(AsRef::as_ref)
        .filter(|entry| seen.insert(*entry) && !actual_set.contains(entry))
        .map(ToString::to_string)
        .collect();

    result
}
