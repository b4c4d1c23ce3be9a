//! Removal of the metadata block at the top of a document.

const TITLE_LINES: [&str; 2] = ["software requirements specification", "table of contents"];
const METADATA_PREFIXES: [&str; 3] = ["project:", "version:", "date:"];

/// Returns `true` if the line belongs to a leading title block: blank,
/// a known title line, or a `Project:`/`Version:`/`Date:` field.
#[must_use]
pub fn is_title_block_line(line: &str) -> bool {
    let normalized = line.trim().to_lowercase();
    normalized.is_empty()
        || TITLE_LINES.contains(&normalized.as_str())
        || METADATA_PREFIXES
            .iter()
            .any(|prefix| normalized.starts_with(prefix))
}

/// Strips the leading title block from `lines`.
///
/// The scan stops for good at the first line that is not part of a title
/// block, so the result is always a suffix of the input.
#[must_use]
pub fn strip_title_block<S: AsRef<str>>(lines: &[S]) -> &[S] {
    let start = lines
        .iter()
        .position(|line| !is_title_block_line(line.as_ref()))
        .unwrap_or(lines.len());
    &lines[start..]
}
