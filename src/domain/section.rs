//! Segmentation of a document into sections.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::domain::{
    header::{is_toc_line, Header, LineWindow},
    requirement::{extract_requirements, Requirement},
    title_block::strip_title_block,
};

/// Number of leading lines checked against the TOC-line filter by default.
pub const DEFAULT_TOC_SCAN_LINES: usize = 40;

/// A section recovered from a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// The numeric prefix of the header, e.g. `5.1`.
    pub id: Option<String>,
    /// The header title. Never empty.
    pub title: String,
    /// Non-header lines up to the next header, newline-joined and trimmed.
    pub body: String,
    /// Requirement statements found in the body, in order.
    pub requirements: Vec<Requirement>,
}

impl Section {
    fn close(header: Header, body: &[&str]) -> Self {
        let body = body.join("\n").trim().to_string();
        let requirements = extract_requirements(&body);
        tracing::trace!(
            title = %header.title,
            kind = ?header.kind,
            requirements = requirements.len(),
            "closed section"
        );
        Self {
            id: header.id,
            title: header.title,
            body,
            requirements,
        }
    }

    /// The id and title together, as they would appear in a heading.
    #[must_use]
    pub fn display_title(&self) -> String {
        self.id
            .as_ref()
            .map_or_else(|| self.title.clone(), |id| format!("{id} {}", self.title))
    }
}

/// Splits documents into [`Section`]s.
///
/// Segmentation runs in a single forward pass:
///
/// 1. the leading title block is stripped;
/// 2. TOC-style lines within the first `toc_scan_lines` lines of the document
///    are dropped;
/// 3. every remaining line is classified with its neighbours, and each header
///    closes the section before it.
///
/// Text before the first header belongs to no section and is discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segmenter {
    toc_scan_lines: usize,
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new(DEFAULT_TOC_SCAN_LINES)
    }
}

impl Segmenter {
    /// Creates a segmenter that filters TOC lines within the first
    /// `toc_scan_lines` lines of a document.
    #[must_use]
    pub const fn new(toc_scan_lines: usize) -> Self {
        Self { toc_scan_lines }
    }

    /// Segments `text` into sections in document order.
    ///
    /// Returns an empty list if no header is recognised.
    #[must_use]
    #[instrument(level = "debug", skip_all, fields(bytes = text.len()))]
    pub fn segment(&self, text: &str) -> Vec<Section> {
        let raw: Vec<&str> = text.lines().collect();
        let content = strip_title_block(&raw);
        let offset = raw.len() - content.len();

        let lines: Vec<&str> = content
            .iter()
            .enumerate()
            .filter(|&(i, line)| offset + i >= self.toc_scan_lines || !is_toc_line(line))
            .map(|(_, line)| line.trim())
            .collect();

        let mut sections = Vec::new();
        let mut current: Option<Header> = None;
        let mut body: Vec<&str> = Vec::new();

        for window in LineWindow::over(&lines) {
            if let Some(header) = window.classify() {
                if let Some(open) = current.take() {
                    sections.push(Section::close(open, &body));
                }
                body.clear();
                current = Some(header);
            } else if current.is_some() {
                body.push(window.current);
            }
        }

        if let Some(open) = current {
            sections.push(Section::close(open, &body));
        }

        tracing::debug!(
            lines = raw.len(),
            skipped = raw.len() - lines.len(),
            sections = sections.len(),
            "segmented document"
        );
        sections
    }
}

/// Segments `text` with the default settings.
#[must_use]
pub fn segment(text: &str) -> Vec<Section> {
    Segmenter::default().segment(text)
}
