//! Requirement statements found in section bodies.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Identifier patterns, tried in order. The first pattern to match a line
/// wins.
static PATTERNS: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        Regex::new(r"\bREQ-\d+\b").expect("valid regex"),
        Regex::new(r"\bID:\s*[A-Z][A-Z0-9]*-\d+\b").expect("valid regex"),
    ]
});

/// A single requirement statement found in a section body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    /// The matched identifier token, e.g. `REQ-12` or `ID: ABC-45`.
    pub id: String,
    /// The full source line, trimmed.
    pub text: String,
}

impl Requirement {
    /// Recognises a requirement on a single line.
    ///
    /// Returns `None` if the line carries no identifier.
    #[must_use]
    pub fn from_line(line: &str) -> Option<Self> {
        let text = line.trim();
        PATTERNS
            .iter()
            .find_map(|pattern| pattern.find(text))
            .map(|token| Self {
                id: token.as_str().to_string(),
                text: text.to_string(),
            })
    }
}

/// Extracts every requirement statement from a block of body text, in line
/// order. Each line contributes at most one requirement.
#[must_use]
pub fn extract_requirements(body: &str) -> Vec<Requirement> {
    body.lines().filter_map(Requirement::from_line).collect()
}
