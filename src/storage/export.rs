use crate::domain::{
    conformance::StructureReport, section::Section, traceability::TraceabilityIndex,
};

const CSV_HEADER: &str = "requirement_id,section_id,section_title,text";

/// Serializes the traceability index as pretty-printed JSON, keyed by
/// requirement id.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn traceability_json(index: &TraceabilityIndex) -> serde_json::Result<String> {
    serde_json::to_string_pretty(index)
}

/// Serializes the traceability index as CSV, one row per requirement.
#[must_use]
pub fn traceability_csv(index: &TraceabilityIndex) -> String {
    let mut output = String::from(CSV_HEADER);
    output.push('\n');
    for (id, entry) in index.iter() {
        let row = [
            id,
            entry.section_id.as_deref().unwrap_or_default(),
            entry.section_title.as_str(),
            entry.text.as_str(),
        ];
        let fields: Vec<_> = row.iter().map(|field| csv_field(field)).collect();
        output.push_str(&fields.join(","));
        output.push('\n');
    }
    output
}

/// Quotes a CSV field when it contains a delimiter, quote or line break.
fn csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Renders every requirement as a row of a Markdown table, grouped by section
/// in document order.
#[must_use]
pub fn traceability_markdown(sections: &[Section]) -> String {
    let mut output = String::from("| Requirement | Section | Text |\n|---|---|---|\n");
    for section in sections {
        let title = section.display_title();
        for requirement in &section.requirements {
            output.push_str(&format!(
                "| {} | {} | {} |\n",
                table_cell(&requirement.id),
                table_cell(&title),
                table_cell(&requirement.text)
            ));
        }
    }
    output
}

fn table_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

/// Serializes sections as a pretty-printed JSON array.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn sections_json(sections: &[Section]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(sections)
}

/// Renders a structure report as Markdown.
#[must_use]
pub fn report_markdown(document: &str, report: &StructureReport) -> String {
    let mut output = format!("# Structure Check: {document}\n\n");
    match report {
        StructureReport::Skipped { reason } => {
            output.push_str(&format!("> Skipped: {reason}.\n"));
        }
        StructureReport::Compared {
            comparison,
            narrative,
            ..
        } => {
            for (heading, entries) in [
                ("Matched", &comparison.matched),
                ("Missing", &comparison.missing),
                ("Extra", &comparison.extra),
            ] {
                output.push_str(&format!("## {heading} ({})\n\n", entries.len()));
                for entry in entries {
                    output.push_str(&format!("- {entry}\n"));
                }
                output.push('\n');
            }
            if let Some(narrative) = narrative {
                output.push_str(&format!(
                    "## Fuzzy Comparison\n\n{}\n",
                    narrative.trim()
                ));
            }
        }
    }
    output.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{compare_toc, segment};

    const DOCUMENT: &str = "5.1 Authentication\nREQ-1 The system shall log out after 10 minutes.\n\n5.2 Persistence\nREQ-2 User settings, once saved, shall \"persist\".";

    #[test]
    fn csv_has_header_and_quoted_rows() {
        let index = TraceabilityIndex::build(&segment(DOCUMENT));
        let csv = traceability_csv(&index);
        let lines: Vec<_> = csv.lines().collect();

        assert_eq!(lines[0], "requirement_id,section_id,section_title,text");
        assert_eq!(
            lines[1],
            "REQ-1,5.1,Authentication,REQ-1 The system shall log out after 10 minutes."
        );
        assert_eq!(
            lines[2],
            r#"REQ-2,5.2,Persistence,"REQ-2 User settings, once saved, shall ""persist"".""#
        );
    }

    #[test]
    fn json_is_keyed_by_requirement() {
        let index = TraceabilityIndex::build(&segment(DOCUMENT));
        let json: serde_json::Value =
            serde_json::from_str(&traceability_json(&index).unwrap()).unwrap();

        assert_eq!(json["REQ-1"]["section_title"], "Authentication");
        assert_eq!(json["REQ-2"]["section_id"], "5.2");
    }

    #[test]
    fn markdown_table_rows() {
        let sections = segment("# Login\nREQ-1 Login shall work.\n# Logout\nREQ-2 Logout | exit.");
        let markdown = traceability_markdown(&sections);

        assert!(markdown.contains("| REQ-1 | Login | REQ-1 Login shall work. |"));
        assert!(markdown.contains("| REQ-2 | Logout | REQ-2 Logout \\| exit. |"));
    }

    #[test]
    fn sections_json_uses_contract_field_names() {
        let json: serde_json::Value =
            serde_json::from_str(&sections_json(&segment(DOCUMENT)).unwrap()).unwrap();

        assert_eq!(json[0]["id"], "5.1");
        assert_eq!(json[0]["title"], "Authentication");
        assert_eq!(json[0]["requirements"][0]["id"], "REQ-1");
        assert!(json[1]["body"].as_str().unwrap().starts_with("REQ-2"));
    }

    #[test]
    fn report_lists_partitions() {
        let report = StructureReport::Compared {
            toc: vec!["1. Intro".to_string()],
            comparison: compare_toc(&["1. Intro"], &["1. Intro", "2. Scope"]),
            narrative: Some("Scope is absent.".to_string()),
        };
        let markdown = report_markdown("srs.txt", &report);

        assert!(markdown.starts_with("# Structure Check: srs.txt"));
        assert!(markdown.contains("## Matched (1)\n\n- 1. Intro"));
        assert!(markdown.contains("## Missing (1)\n\n- 2. Scope"));
        assert!(markdown.contains("## Extra (0)"));
        assert!(markdown.ends_with("Scope is absent."));
    }

    #[test]
    fn skipped_report() {
        let report = StructureReport::Skipped {
            reason: crate::domain::conformance::SkipReason::EmptyDocumentToc,
        };
        assert!(report_markdown("a.txt", &report)
            .contains("> Skipped: no table of contents found in the document."));
    }
}
