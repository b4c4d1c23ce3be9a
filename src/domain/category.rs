//! Keyword-based grouping of requirements into themes.

use serde::{Deserialize, Serialize};

use crate::domain::requirement::Requirement;

/// A named theme and the keywords that place a requirement in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Display name, e.g. `Security`.
    pub name: String,
    /// Case-insensitive substrings that select the category.
    pub keywords: Vec<String>,
}

impl Category {
    fn new(name: &str, keywords: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            keywords: keywords.iter().map(ToString::to_string).collect(),
        }
    }

    /// Returns `true` if `text` contains any of the category's keywords.
    #[must_use]
    pub fn matches(&self, text: &str) -> bool {
        let text = text.to_lowercase();
        self.keywords
            .iter()
            .any(|keyword| text.contains(&keyword.to_lowercase()))
    }
}

/// The built-in category dictionary.
#[must_use]
pub fn default_categories() -> Vec<Category> {
    vec![
        Category::new(
            "Authentication",
            &["login", "authenticate", "password", "credentials", "access"],
        ),
        Category::new(
            "Error Handling",
            &["fail", "error", "retry", "invalid", "exception"],
        ),
        Category::new(
            "Security",
            &[
                "encrypt",
                "encryption",
                "access control",
                "confidentiality",
                "authorization",
            ],
        ),
        Category::new(
            "Data Handling",
            &[
                "save", "load", "store", "record", "retrieve", "transmit", "data", "backup",
            ],
        ),
    ]
}

/// The requirements that fell into one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group<'a> {
    /// The category name.
    pub category: &'a str,
    /// Matching requirements, in input order.
    pub requirements: Vec<&'a Requirement>,
}

/// Groups requirements by keyword, one group per category in configuration
/// order. A requirement may appear in several groups.
#[must_use]
pub fn group_requirements<'a>(
    requirements: &'a [Requirement],
    categories: &'a [Category],
) -> Vec<Group<'a>> {
    categories
        .iter()
        .map(|category| Group {
            category: &category.name,
            requirements: requirements
                .iter()
                .filter(|requirement| category.matches(&requirement.text))
                .collect(),
        })
        .collect()
}

/// Names of the categories that no requirement fell into.
#[must_use]
pub fn detect_gaps<'a>(groups: &[Group<'a>]) -> Vec<&'a str> {
    groups
        .iter()
        .filter(|group| group.requirements.is_empty())
        .map(|group| group.category)
        .collect()
}
