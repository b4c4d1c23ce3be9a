//! Structure recovery for Software Requirements Specification documents.
//!
//! Loosely formatted SRS text is split into sections, requirement statements
//! are pulled out of section bodies, and the document's table of contents is
//! compared against a reference outline.

pub mod domain;
pub use domain::{
    compare_toc, segment, ComparisonResult, Config, Requirement, Section, Segmenter,
    StructureConformance, StructureReport, TraceabilityIndex,
};

/// Document loading and export formatting.
pub mod storage;
pub use storage::{LoadError, Paragraph};
