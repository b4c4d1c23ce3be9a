//! Table-of-contents extraction.
//!
//! Detection is line-local: every line is judged on its own, with no notion of
//! the TOC having "started" or "ended".

use crate::domain::header::{clean_toc_line, is_toc_line, is_toc_style};

/// A paragraph of text that may carry a style name, as produced by a
/// word-processor reader.
pub trait StyledLine {
    /// The paragraph text.
    fn text(&self) -> &str;

    /// The paragraph style name, if the reader preserved one.
    fn style_name(&self) -> Option<&str>;

    /// Whether the paragraph's style marks it as a TOC entry.
    fn has_toc_style(&self) -> bool {
        self.style_name().is_some_and(is_toc_style)
    }
}

/// Extracts cleaned TOC entries from plain text, in document order.
#[must_use]
pub fn extract_from_text(text: &str) -> Vec<String> {
    let entries: Vec<String> = text
        .lines()
        .filter(|line| is_toc_line(line))
        .map(clean_toc_line)
        .collect();
    tracing::debug!(entries = entries.len(), "extracted TOC from text");
    entries
}

/// Extracts TOC entries from styled paragraphs, in document order.
///
/// A paragraph qualifies if its style is a TOC style or, for readers that
/// drop styles, if its text looks like a TOC line. Entries are trimmed but
/// otherwise returned verbatim.
#[must_use]
pub fn extract_from_paragraphs<P: StyledLine>(paragraphs: &[P]) -> Vec<String> {
    let entries: Vec<String> = paragraphs
        .iter()
        .filter(|paragraph| !paragraph.text().trim().is_empty())
        .filter(|paragraph| paragraph.has_toc_style() || is_toc_line(paragraph.text()))
        .map(|paragraph| paragraph.text().trim().to_string())
        .collect();
    tracing::debug!(
        paragraphs = paragraphs.len(),
        entries = entries.len(),
        "extracted TOC from paragraphs"
    );
    entries
}
