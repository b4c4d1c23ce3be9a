//! Line classification for section headers and table-of-contents entries.
//!
//! Every predicate here is pure and works on a single line. The only
//! context a header decision may use is the immediately neighbouring lines,
//! supplied through a [`LineWindow`].

use std::sync::LazyLock;

use regex::Regex;

static NUMBERED_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(\.\d+)*[.)]?\s+").expect("valid regex"));

static ID_AND_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+(?:\.\d+)*)[.)]?\s+(.*)$").expect("valid regex"));

static ALL_CAPS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z\s]+$").expect("valid regex"));

/// A dotted leader running to the end of the line, with an optional page
/// number.
static TOC_LEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.{3,}\s*\d*$").expect("valid regex"));

/// A multi-level number followed by a stray period, e.g. `1.2. `.
static TOC_NUMBERING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+\.\d+)\.\s+").expect("valid regex"));

const MAX_ALL_CAPS_WORDS: usize = 5;
const MIN_ALL_CAPS_LETTERS: usize = 2;
const MAX_FALLBACK_WORDS: usize = 4;

/// The kinds of header the classifier recognises, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderKind {
    /// `# Title`
    Markdown,
    /// `1.2 Title`, `3) Title`
    Numbered,
    /// `SYSTEM OVERVIEW`, visually separated from the surrounding text.
    AllCaps,
    /// A short title-case line such as `Scope`.
    Fallback,
}

impl HeaderKind {
    /// Classification order. The first kind that matches wins.
    pub const PRIORITY: [Self; 4] = [Self::Markdown, Self::Numbered, Self::AllCaps, Self::Fallback];

    /// Whether the current line of `window` is a header of this kind.
    #[must_use]
    pub fn matches(self, window: &LineWindow<'_>) -> bool {
        let line = window.current;
        match self {
            Self::Markdown => is_markdown_header(line),
            Self::Numbered => is_numbered_header(line),
            Self::AllCaps => is_isolated_all_caps_header(line, window.previous, window.next),
            Self::Fallback => is_fallback_header(line),
        }
    }

    /// Builds the header record for a line already known to be of this kind.
    #[must_use]
    pub fn extract(self, line: &str) -> Header {
        let (id, title) = match self {
            Self::Markdown => {
                let (id, title) = extract_id_and_title(strip_markdown_markers(line));
                (id, strip_markdown_markers(&title).to_string())
            }
            Self::Numbered => extract_id_and_title(line),
            Self::AllCaps | Self::Fallback => (None, line.trim().to_string()),
        };
        Header {
            kind: self,
            id,
            title,
        }
    }
}

/// A recognised section header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Which rule recognised the header.
    pub kind: HeaderKind,
    /// Dotted numeric prefix, when the header carried one (e.g. `5.1`).
    pub id: Option<String>,
    /// The header text with any marker and numeric prefix removed.
    pub title: String,
}

/// A trimmed line together with its trimmed neighbours.
///
/// Missing neighbours (at the start or end of the document) are empty
/// strings, which count as visual separation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineWindow<'a> {
    /// The line before `current`, or `""`.
    pub previous: &'a str,
    /// The line being classified.
    pub current: &'a str,
    /// The line after `current`, or `""`.
    pub next: &'a str,
}

impl<'a> LineWindow<'a> {
    /// Slides a three-line window over `lines`, yielding one window per line.
    pub fn over(lines: &'a [&'a str]) -> impl Iterator<Item = Self> + 'a {
        lines.iter().enumerate().map(move |(i, &current)| Self {
            previous: i.checked_sub(1).map_or("", |p| lines[p]),
            current,
            next: lines.get(i + 1).copied().unwrap_or(""),
        })
    }

    /// Classifies the current line, trying each [`HeaderKind`] in priority
    /// order.
    #[must_use]
    pub fn classify(&self) -> Option<Header> {
        HeaderKind::PRIORITY
            .into_iter()
            .find(|kind| kind.matches(self))
            .map(|kind| kind.extract(self.current))
    }
}

/// Returns `true` if the line is a markdown-style header (`# Title`).
#[must_use]
pub fn is_markdown_header(line: &str) -> bool {
    line.starts_with("# ")
}

/// Removes every leading `# ` marker, so `# # Nested` yields `Nested`.
fn strip_markdown_markers(line: &str) -> &str {
    let mut rest = line.trim();
    while let Some(stripped) = rest.strip_prefix("# ") {
        rest = stripped.trim_start();
    }
    rest
}

/// Returns `true` if the line starts with a dotted section number followed by
/// whitespace (`1.`, `2.1.3`, `4)`).
#[must_use]
pub fn is_numbered_header(line: &str) -> bool {
    NUMBERED_HEADER.is_match(line)
}

/// Returns `true` if the line is short and written only in capital letters.
///
/// Anything other than `A-Z` and whitespace disqualifies the line, so tokens
/// like `N/A` are never headers.
#[must_use]
pub fn is_all_caps_header(line: &str) -> bool {
    ALL_CAPS.is_match(line)
        && line.split_whitespace().count() <= MAX_ALL_CAPS_WORDS
        && line.chars().filter(char::is_ascii_uppercase).count() >= MIN_ALL_CAPS_LETTERS
}

/// Returns `true` if the line is an all-caps header with a blank line on at
/// least one side.
///
/// Without the blank-line requirement, shouted phrases in the middle of a
/// paragraph would split sections.
#[must_use]
pub fn is_isolated_all_caps_header(line: &str, previous: &str, next: &str) -> bool {
    is_all_caps_header(line) && (previous.is_empty() || next.is_empty())
}

/// Returns `true` for informal headers: one to four words, in title case.
#[must_use]
pub fn is_fallback_header(line: &str) -> bool {
    let line = line.trim();
    let words = line.split_whitespace().count();
    (1..=MAX_FALLBACK_WORDS).contains(&words) && is_title_case(line)
}

/// Title-case check over character runs.
///
/// Uppercase letters may only follow uncased characters, and lowercase
/// letters may only follow cased ones. At least one cased character is
/// required.
fn is_title_case(text: &str) -> bool {
    let mut previous_cased = false;
    let mut any_cased = false;

    for c in text.chars() {
        if c.is_uppercase() {
            if previous_cased {
                return false;
            }
            previous_cased = true;
            any_cased = true;
        } else if c.is_lowercase() {
            if !previous_cased {
                return false;
            }
            previous_cased = true;
            any_cased = true;
        } else {
            previous_cased = false;
        }
    }

    any_cased
}

/// Splits a header into its dotted numeric id and title.
///
/// ```
/// use srs_inspector::domain::header::extract_id_and_title;
///
/// assert_eq!(
///     extract_id_and_title("5.1.9 Auto Log-Off"),
///     (Some("5.1.9".to_string()), "Auto Log-Off".to_string())
/// );
/// assert_eq!(extract_id_and_title(" Scope "), (None, "Scope".to_string()));
/// ```
#[must_use]
pub fn extract_id_and_title(line: &str) -> (Option<String>, String) {
    let line = line.trim();
    ID_AND_TITLE.captures(line).map_or_else(
        || (None, line.to_string()),
        |captures| {
            (
                Some(captures[1].to_string()),
                captures[2].trim().to_string(),
            )
        },
    )
}

/// Returns `true` if the line looks like a table-of-contents entry: it has a
/// dotted leader and ends in a page number.
///
/// Ordinary ellipses rarely end a line with a digit, so both signals are
/// required.
#[must_use]
pub fn is_toc_line(line: &str) -> bool {
    let line = line.trim();
    // four or more dots always contain "..."
    line.contains("...") && line.ends_with(|c: char| c.is_ascii_digit())
}

/// Removes the dotted leader and page number from a TOC entry and normalises
/// `1.2. Title` to `1.2 Title`.
///
/// Cleaning is applied until nothing changes, so it is idempotent.
///
/// ```
/// use srs_inspector::domain::header::clean_toc_line;
///
/// assert_eq!(clean_toc_line("1. Overview ..................... 2"), "1. Overview");
/// assert_eq!(clean_toc_line("1.2. Scope .... 3"), "1.2 Scope");
/// ```
#[must_use]
pub fn clean_toc_line(line: &str) -> String {
    let mut current = line.trim().to_string();
    loop {
        let cleaned = clean_once(&current);
        if cleaned == current {
            return cleaned;
        }
        current = cleaned;
    }
}

fn clean_once(line: &str) -> String {
    let truncated = TOC_LEADER
        .find(line)
        .map_or(line, |leader| &line[..leader.start()])
        .trim();
    TOC_NUMBERING
        .replace_all(truncated, "${1} ")
        .trim()
        .to_string()
}

/// Returns `true` if a paragraph style name denotes a table-of-contents
/// paragraph (`TOC 1`, `TOC Heading`, `toc2`, ...).
#[must_use]
pub fn is_toc_style(style_name: &str) -> bool {
    style_name.to_lowercase().contains("toc")
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use test_case::test_case;

    use super::*;

    #[test_case("# Section" => true)]
    #[test_case("#Section" => false)]
    #[test_case("## Section" => false)]
    #[test_case("Section" => false)]
    fn markdown_header(line: &str) -> bool {
        is_markdown_header(line)
    }

    #[test_case("1. Introduction" => true)]
    #[test_case("1.2.3 Overview" => true)]
    #[test_case("4) Interfaces" => true)]
    #[test_case("12 Glossary" => true)]
    #[test_case("Version 1.3 applies" => false)]
    #[test_case("1.Introduction" => false)]
    #[test_case("REQ-1 The system shall" => false)]
    fn numbered_header(line: &str) -> bool {
        is_numbered_header(line)
    }

    #[test_case("SYSTEM OVERVIEW" => true)]
    #[test_case("INTRODUCTION" => true)]
    #[test_case("Overview" => false)]
    #[test_case("N/A" => false)]
    #[test_case("A" => false; "single letter")]
    #[test_case("THE SYSTEM SHALL ALWAYS RESPOND QUICKLY" => false; "too many words")]
    fn all_caps_header(line: &str) -> bool {
        is_all_caps_header(line)
    }

    #[test]
    fn all_caps_requires_isolation() {
        assert!(is_isolated_all_caps_header("SCOPE", "", "Text follows."));
        assert!(is_isolated_all_caps_header("SCOPE", "Text before.", ""));
        assert!(!is_isolated_all_caps_header(
            "SCOPE",
            "Text before.",
            "Text follows."
        ));
    }

    #[test_case("Scope" => true)]
    #[test_case("System Overview" => true)]
    #[test_case("Non-Functional Requirements" => true)]
    #[test_case("  Scope  " => true; "surrounding whitespace")]
    #[test_case("Some content." => false)]
    #[test_case("SCOPE" => false)]
    #[test_case("One Two Three Four Five" => false; "five words")]
    #[test_case("1.2" => false; "no cased characters")]
    #[test_case("" => false)]
    fn fallback_header(line: &str) -> bool {
        is_fallback_header(line)
    }

    #[test_case("5.1.9 Auto Log-Off", Some("5.1.9"), "Auto Log-Off")]
    #[test_case("1. Introduction", Some("1"), "Introduction")]
    #[test_case("2) Scope", Some("2"), "Scope")]
    #[test_case("Scope", None, "Scope")]
    #[test_case("Version 1.3", None, "Version 1.3")]
    fn id_and_title(line: &str, id: Option<&str>, title: &str) {
        assert_eq!(
            extract_id_and_title(line),
            (id.map(ToString::to_string), title.to_string())
        );
    }

    #[test_case("2. Scope ............. 3" => true)]
    #[test_case("1.1 Purpose ... 12" => true)]
    #[test_case("Just some paragraph text." => false)]
    #[test_case("Wait... what" => false; "ellipsis without page number")]
    #[test_case("Released in 2024" => false; "page number without leader")]
    fn toc_line(line: &str) -> bool {
        is_toc_line(line)
    }

    #[test_case("1. Overview ..................... 2", "1. Overview")]
    #[test_case("1.2. Scope ........ 4", "1.2 Scope")]
    #[test_case("  Appendix A ...... ", "Appendix A"; "no page number")]
    #[test_case("3.1 Interfaces", "3.1 Interfaces"; "already clean")]
    fn clean_toc(raw: &str, expected: &str) {
        assert_eq!(clean_toc_line(raw), expected);
    }

    #[test_case("1. Overview ..................... 2")]
    #[test_case("A.... 1.... 2")]
    #[test_case("1.2. 3.4. Nested .... 9")]
    #[test_case("...")]
    #[test_case("")]
    fn clean_toc_is_idempotent(raw: &str) {
        let once = clean_toc_line(raw);
        assert_eq!(clean_toc_line(&once), once);
    }

    #[test_case("TOC 1" => true)]
    #[test_case("TOC Heading" => true)]
    #[test_case("toc2" => true)]
    #[test_case("Heading 1" => false)]
    fn toc_style(style: &str) -> bool {
        is_toc_style(style)
    }

    #[test]
    fn priority_prefers_markdown_over_fallback() {
        let lines = ["# Scope"];
        let header = LineWindow::over(&lines).next().unwrap().classify().unwrap();
        assert_eq!(header.kind, HeaderKind::Markdown);
        assert_eq!(header.title, "Scope");
    }

    #[test]
    fn markdown_header_may_carry_an_id() {
        let header = HeaderKind::Markdown.extract("# 5.1 Authentication");
        assert_eq!(header.id.as_deref(), Some("5.1"));
        assert_eq!(header.title, "Authentication");
    }

    #[test_case("# Scope" => "Scope")]
    #[test_case("# # Nested" => "Nested")]
    #[test_case("#  #   Deeply nested" => "Deeply nested")]
    #[test_case("# 2.1 # Marked" => "Marked"; "marker after the id")]
    fn markdown_title_has_no_marker(line: &str) -> String {
        HeaderKind::Markdown.extract(line).title
    }

    #[test]
    fn all_caps_in_running_text_is_not_a_header() {
        let lines = ["Some text before", "IMPORTANT NOTE", "and some after"];
        let windows: Vec<_> = LineWindow::over(&lines).collect();
        assert_eq!(windows[1].classify(), None);
    }

    #[test]
    fn windows_pad_document_edges_with_blanks() {
        let lines = ["first", "second"];
        let windows: Vec<_> = LineWindow::over(&lines).collect();
        assert_eq!(windows[0].previous, "");
        assert_eq!(windows[0].next, "second");
        assert_eq!(windows[1].previous, "first");
        assert_eq!(windows[1].next, "");
    }

    proptest! {
        #[test]
        fn prop_clean_toc_line_is_idempotent(raw in "[0-9A-Za-z. ]{0,40}") {
            let once = clean_toc_line(&raw);
            prop_assert_eq!(clean_toc_line(&once), once);
        }

        #[test]
        fn prop_markdown_title_never_keeps_a_marker(
            tail in "[#0-9A-Za-z. ]{0,20}",
        ) {
            let header = HeaderKind::Markdown.extract(&format!("# {tail}"));
            prop_assert!(!header.title.starts_with("# "));
        }
    }
}
