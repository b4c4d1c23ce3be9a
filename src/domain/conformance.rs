//! Structure conformance: does a document follow the reference outline?

use std::fmt;

use serde::Serialize;
use tracing::instrument;

use crate::domain::{
    comparison::{compare_toc, ComparisonResult},
    header::clean_toc_line,
    toc::{self, StyledLine},
};

/// An external service that compares TOCs loosely, e.g. a language model.
///
/// Implementations may perform network calls; the core never does.
pub trait FuzzyComparator: Send + Sync {
    /// Produces a narrative describing how `document` aligns with
    /// `reference`, including approximate matches.
    ///
    /// # Errors
    ///
    /// Returns an error if the service cannot produce a comparison.
    fn compare(&self, reference: &[String], document: &[String]) -> Result<String, FuzzyError>;
}

/// Failure reported by a [`FuzzyComparator`].
#[derive(Debug, thiserror::Error)]
#[error("fuzzy comparison failed: {0}")]
pub struct FuzzyError(pub String);

/// Errors raised while checking structure conformance.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The fuzzy comparator failed.
    #[error(transparent)]
    Fuzzy(#[from] FuzzyError),
}

/// Why a comparison was not carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// No TOC entries were found in the document.
    EmptyDocumentToc,
    /// The reference outline is empty.
    EmptyReference,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::EmptyDocumentToc => write!(f, "no table of contents found in the document"),
            Self::EmptyReference => write!(f, "the reference table of contents is empty"),
        }
    }
}

/// The result of a structure check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StructureReport {
    /// One of the TOCs was empty, so no comparison was made.
    Skipped {
        /// Which side was empty.
        reason: SkipReason,
    },
    /// The TOCs were compared.
    Compared {
        /// The cleaned TOC extracted from the document.
        toc: Vec<String>,
        /// The exact set comparison.
        comparison: ComparisonResult,
        /// The fuzzy comparator's narrative, when one was configured.
        narrative: Option<String>,
    },
}

impl StructureReport {
    /// Returns `true` if the document was compared and nothing was missing.
    #[must_use]
    pub fn is_conformant(&self) -> bool {
        matches!(self, Self::Compared { comparison, .. } if comparison.is_conformant())
    }
}

/// Checks documents against a reference TOC.
#[derive(Clone, Copy)]
pub struct StructureConformance<'a> {
    reference: &'a [String],
    fuzzy: Option<&'a dyn FuzzyComparator>,
}

impl fmt::Debug for StructureConformance<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructureConformance")
            .field("reference", &self.reference)
            .field("fuzzy", &self.fuzzy.is_some())
            .finish()
    }
}

impl<'a> StructureConformance<'a> {
    /// Creates a checker for the given reference TOC.
    #[must_use]
    pub const fn new(reference: &'a [String]) -> Self {
        Self {
            reference,
            fuzzy: None,
        }
    }

    /// Also asks `comparator` for a fuzzy comparison on every check.
    #[must_use]
    pub const fn with_fuzzy(self, comparator: &'a dyn FuzzyComparator) -> Self {
        Self {
            fuzzy: Some(comparator),
            ..self
        }
    }

    /// Checks a plain-text document.
    ///
    /// # Errors
    ///
    /// Returns an error if the fuzzy comparator fails.
    pub fn check_text(&self, text: &str) -> Result<StructureReport, Error> {
        self.check(toc::extract_from_text(text))
    }

    /// Checks a document made of styled paragraphs.
    ///
    /// Paragraph entries are cleaned before comparison.
    ///
    /// # Errors
    ///
    /// Returns an error if the fuzzy comparator fails.
    pub fn check_paragraphs<P: StyledLine>(
        &self,
        paragraphs: &[P],
    ) -> Result<StructureReport, Error> {
        let entries = toc::extract_from_paragraphs(paragraphs)
            .iter()
            .map(|entry| clean_toc_line(entry))
            .collect();
        self.check(entries)
    }

    /// Compares an already-extracted, cleaned TOC.
    ///
    /// # Errors
    ///
    /// Returns an error if the fuzzy comparator fails.
    #[instrument(level = "debug", skip_all, fields(entries = toc.len()))]
    pub fn check(&self, toc: Vec<String>) -> Result<StructureReport, Error> {
        if toc.is_empty() {
            return Ok(StructureReport::Skipped {
                reason: SkipReason::EmptyDocumentToc,
            });
        }
        if self.reference.is_empty() {
            return Ok(StructureReport::Skipped {
                reason: SkipReason::EmptyReference,
            });
        }

        let comparison = compare_toc(toc.as_slice(), self.reference);
        tracing::debug!(
            matched = comparison.matched.len(),
            missing = comparison.missing.len(),
            extra = comparison.extra.len(),
            "compared TOC"
        );

        let narrative = self
            .fuzzy
            .map(|comparator| comparator.compare(self.reference, &toc))
            .transpose()?;

        Ok(StructureReport::Compared {
            toc,
            comparison,
            narrative,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn reference() -> Vec<String> {
        ["1. Introduction", "1.2 Scope", "2. Overall Description"]
            .map(String::from)
            .to_vec()
    }

    #[derive(Default)]
    struct Recording {
        calls: AtomicUsize,
    }

    impl FuzzyComparator for Recording {
        fn compare(&self, reference: &[String], document: &[String]) -> Result<String, FuzzyError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(format!("{} of {}", document.len(), reference.len()))
        }
    }

    struct Failing;

    impl FuzzyComparator for Failing {
        fn compare(&self, _: &[String], _: &[String]) -> Result<String, FuzzyError> {
            Err(FuzzyError("service unavailable".to_string()))
        }
    }

    #[test]
    fn plain_text_toc_is_matched() {
        let reference = reference();
        let text = "1. Introduction .................. 1\n1.2 Scope .................. 2\n";

        let report = StructureConformance::new(&reference).check_text(text).unwrap();

        let StructureReport::Compared { comparison, .. } = report else {
            panic!("expected a comparison");
        };
        assert_eq!(comparison.matched, ["1. Introduction", "1.2 Scope"]);
        assert_eq!(comparison.missing, ["2. Overall Description"]);
    }

    #[test]
    fn paragraph_entries_are_cleaned_before_comparison() {
        struct Para(&'static str, &'static str);
        impl StyledLine for Para {
            fn text(&self) -> &str {
                self.0
            }
            fn style_name(&self) -> Option<&str> {
                Some(self.1)
            }
        }

        let reference = reference();
        let paragraphs = [
            Para("1. Introduction ....... 1", "TOC 1"),
            Para("1.2. Scope", "TOC 2"),
            Para("2. Overall Description", "TOC 1"),
            Para("Not a TOC item", "Heading 1"),
        ];

        let report = StructureConformance::new(&reference)
            .check_paragraphs(&paragraphs)
            .unwrap();
        assert!(report.is_conformant());
    }

    #[test]
    fn empty_document_toc_skips_without_calling_collaborator() {
        let reference = reference();
        let fuzzy = Recording::default();

        let report = StructureConformance::new(&reference)
            .with_fuzzy(&fuzzy)
            .check_text("# Introduction\nno contents page")
            .unwrap();

        assert_eq!(
            report,
            StructureReport::Skipped {
                reason: SkipReason::EmptyDocumentToc
            }
        );
        assert!(!report.is_conformant());
        assert_eq!(fuzzy.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn empty_reference_skips() {
        let fuzzy = Recording::default();
        let report = StructureConformance::new(&[])
            .with_fuzzy(&fuzzy)
            .check(vec!["1. Introduction".to_string()])
            .unwrap();

        assert_eq!(
            report,
            StructureReport::Skipped {
                reason: SkipReason::EmptyReference
            }
        );
        assert_eq!(fuzzy.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn fuzzy_narrative_accompanies_strict_result() {
        let reference = reference();
        let fuzzy = Recording::default();

        let report = StructureConformance::new(&reference)
            .with_fuzzy(&fuzzy)
            .check(vec!["1. Overview".to_string()])
            .unwrap();

        let StructureReport::Compared {
            comparison,
            narrative,
            ..
        } = report
        else {
            panic!("expected a comparison");
        };
        assert_eq!(comparison.extra, ["1. Overview"]);
        assert_eq!(narrative.as_deref(), Some("1 of 3"));
        assert_eq!(fuzzy.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn fuzzy_failure_propagates() {
        let reference = reference();
        let error = StructureConformance::new(&reference)
            .with_fuzzy(&Failing)
            .check(vec!["1. Introduction".to_string()])
            .unwrap_err();
        assert_eq!(
            error.to_string(),
            "fuzzy comparison failed: service unavailable"
        );
    }
}
