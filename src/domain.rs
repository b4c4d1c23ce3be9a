//! Document structure recovery and conformance checking.
//!
//! Everything in this module is pure: functions take text and return new
//! values, with no I/O and no shared state.

pub mod category;
pub mod comparison;
mod config;
pub mod conformance;
pub mod header;
pub mod requirement;
pub mod section;
pub mod title_block;
pub mod toc;
pub mod traceability;

pub use category::Category;
pub use comparison::{compare_toc, ComparisonResult};
pub use config::{Config, ConfigError};
pub use conformance::{FuzzyComparator, StructureConformance, StructureReport};
pub use header::HeaderKind;
pub use requirement::Requirement;
pub use section::{segment, Section, Segmenter};
pub use toc::StyledLine;
pub use traceability::TraceabilityIndex;
