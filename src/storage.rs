mod document;
/// Export formatting for parsed documents.
pub mod export;

pub use document::{load_document, load_paragraphs, paragraphs_to_text, LoadError, Paragraph};
