use std::{
    fs::File,
    io::{self, BufReader},
    path::Path,
};

use serde::{Deserialize, Serialize};

use crate::domain::StyledLine;

/// A paragraph exported by a word-processor reader.
///
/// Paragraph dumps are JSON arrays of `{"text": ..., "style": ...}` objects;
/// `style` may be omitted or `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    /// The paragraph text.
    pub text: String,
    /// The paragraph style name, e.g. `TOC 1` or `Heading 2`.
    #[serde(default)]
    pub style: Option<String>,
}

impl StyledLine for Paragraph {
    fn text(&self) -> &str {
        &self.text
    }

    fn style_name(&self) -> Option<&str> {
        self.style.as_deref()
    }
}

/// Errors that can occur when loading a document.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The document file was not found.
    #[error("document not found")]
    NotFound,
    /// An I/O error occurred, including invalid UTF-8.
    #[error("failed to read document")]
    Io(#[source] io::Error),
    /// The paragraph dump is not valid JSON.
    #[error("failed to parse paragraph dump")]
    Json(#[from] serde_json::Error),
}

impl From<io::Error> for LoadError {
    fn from(error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => Self::NotFound,
            _ => Self::Io(error),
        }
    }
}

/// Reads a UTF-8 text document.
///
/// # Errors
///
/// Returns an error if the file is missing, unreadable or not UTF-8.
pub fn load_document(path: &Path) -> Result<String, LoadError> {
    let text = std::fs::read_to_string(path)?;
    tracing::debug!(path = %path.display(), bytes = text.len(), "loaded document");
    Ok(text)
}

/// Reads a JSON paragraph dump.
///
/// # Errors
///
/// Returns an error if the file is missing, unreadable or malformed.
pub fn load_paragraphs(path: &Path) -> Result<Vec<Paragraph>, LoadError> {
    let reader = BufReader::new(File::open(path)?);
    let paragraphs: Vec<Paragraph> = serde_json::from_reader(reader)?;
    tracing::debug!(
        path = %path.display(),
        paragraphs = paragraphs.len(),
        "loaded paragraphs"
    );
    Ok(paragraphs)
}

/// Joins paragraph text into a document for segmentation.
///
/// Table-of-contents paragraphs are left out, since their entries would
/// otherwise be read as section headers.
#[must_use]
pub fn paragraphs_to_text<P: StyledLine>(paragraphs: &[P]) -> String {
    paragraphs
        .iter()
        .filter(|paragraph| !paragraph.has_toc_style())
        .map(StyledLine::text)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn loads_paragraph_dump() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            br#"[
                {"text": "1. Overview", "style": "TOC 1"},
                {"text": "Overview", "style": null},
                {"text": "The system opens doors."}
            ]"#,
        )
        .unwrap();

        let paragraphs = load_paragraphs(file.path()).unwrap();

        assert_eq!(paragraphs.len(), 3);
        assert_eq!(paragraphs[0].style_name(), Some("TOC 1"));
        assert_eq!(paragraphs[1].style_name(), None);
        assert_eq!(paragraphs[2].text(), "The system opens doors.");
    }

    #[test]
    fn malformed_dump_is_a_json_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();

        assert!(matches!(
            load_paragraphs(file.path()),
            Err(LoadError::Json(_))
        ));
    }

    #[test]
    fn missing_file_is_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_document(&tmp.path().join("absent.txt")),
            Err(LoadError::NotFound)
        ));
    }

    #[test]
    fn loads_text_document() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"# Scope\nbody").unwrap();
        assert_eq!(load_document(file.path()).unwrap(), "# Scope\nbody");
    }

    #[test]
    fn toc_paragraphs_are_dropped_from_text() {
        let paragraphs = [
            Paragraph {
                text: "1. Overview".to_string(),
                style: Some("TOC 1".to_string()),
            },
            Paragraph {
                text: "1. Overview".to_string(),
                style: Some("Heading 1".to_string()),
            },
            Paragraph {
                text: "the system opens doors.".to_string(),
                style: None,
            },
        ];
        assert_eq!(
            paragraphs_to_text(&paragraphs),
            "1. Overview\nthe system opens doors."
        );
    }
}
