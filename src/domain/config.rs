use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{
    category::{default_categories, Category},
    section::DEFAULT_TOC_SCAN_LINES,
};

/// Configuration for structure checking and analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// The standard outline documents are checked against.
    ///
    /// Entries are compared exactly against cleaned TOC lines, so they should
    /// be written the way a cleaned TOC reads, e.g. `1.2 Scope`.
    reference_toc: Vec<String>,

    /// How many lines at the top of a document are checked for TOC entries
    /// when segmenting.
    pub toc_scan_lines: usize,

    /// Keyword categories for grouping requirements.
    categories: Vec<Category>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reference_toc: default_reference_toc(),
            toc_scan_lines: DEFAULT_TOC_SCAN_LINES,
            categories: default_categories(),
        }
    }
}

/// Errors raised when reading or writing a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Failed to read config file: {0}")]
    Read(#[source] std::io::Error),
    /// The file is not valid configuration TOML.
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    /// The configuration could not be serialised.
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// The file could not be written.
    #[error("Failed to write config file: {0}")]
    Write(#[source] std::io::Error),
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Read)?;
        Ok(toml::from_str(&content)?)
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        std::fs::write(path, self.to_toml()?).map_err(ConfigError::Write)
    }

    /// Renders the configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// The reference TOC.
    #[must_use]
    pub fn reference_toc(&self) -> &[String] {
        &self.reference_toc
    }

    /// The requirement categories.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }
}

/// An IEEE 830 style outline, numbered the way a cleaned TOC reads.
fn default_reference_toc() -> Vec<String> {
    [
        "1. Introduction",
        "1.1 Purpose",
        "1.2 Scope",
        "1.3 Definitions, Acronyms, and Abbreviations",
        "1.4 References",
        "1.5 Overview",
        "2. Overall Description",
        "2.1 Product Perspective",
        "2.2 Product Functions",
        "2.3 User Characteristics",
        "2.4 Constraints",
        "2.5 Assumptions and Dependencies",
        "3. Specific Requirements",
        "3.1 External Interface Requirements",
        "3.2 Functional Requirements",
        "3.3 Performance Requirements",
        "3.4 Design Constraints",
        "3.5 Software System Attributes",
        "4. Appendices",
    ]
    .map(String::from)
    .to_vec()
}

const fn default_toc_scan_lines() -> usize {
    DEFAULT_TOC_SCAN_LINES
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_reference_toc")]
        reference_toc: Vec<String>,

        #[serde(default = "default_toc_scan_lines")]
        toc_scan_lines: usize,

        #[serde(default = "default_categories")]
        categories: Vec<Category>,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                reference_toc,
                toc_scan_lines,
                categories,
            } => Self {
                reference_toc,
                toc_scan_lines,
                categories,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            reference_toc: config.reference_toc,
            toc_scan_lines: config.toc_scan_lines,
            categories: config.categories,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn load_reads_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            b"_version = \"1\"\nreference_toc = [\"1. Introduction\", \"2. Scope\"]\ntoc_scan_lines = 60\n\n[[categories]]\nname = \"Safety\"\nkeywords = [\"hazard\"]\n",
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.reference_toc(), ["1. Introduction", "2. Scope"]);
        assert_eq!(config.toc_scan_lines, 60);
        assert_eq!(config.categories().len(), 1);
        assert_eq!(config.categories()[0].name, "Safety");
    }

    #[test]
    fn load_missing_file_returns_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.toml");

        let error = Config::load(&missing).unwrap_err();
        assert!(error.to_string().starts_with("Failed to read config file:"));
    }

    #[test]
    fn load_invalid_toml_returns_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\ntoc_scan_lines = \"forty\"\n")
            .unwrap();

        let error = Config::load(file.path()).unwrap_err();
        assert!(error.to_string().starts_with("Failed to parse config file:"));
    }

    #[test]
    fn empty_file_returns_default() {
        // Tests that deserialising an empty file returns the default configuration.
        let expected = Config::default();
        let actual: Config = toml::from_str(r#"_version = "1""#).unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn save_then_load_preserves_config() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");

        let mut config = Config::default();
        config.toc_scan_lines = 25;
        config.save(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn default_reference_is_in_cleaned_form() {
        for entry in Config::default().reference_toc() {
            assert_eq!(&crate::domain::header::clean_toc_line(entry), entry);
        }
    }
}
