use std::{
    path::{Path, PathBuf},
    process,
};

use anyhow::Context;
use clap::Parser;
use rayon::prelude::*;
use srs_inspector::{
    storage::{export::report_markdown, load_document, load_paragraphs},
    Config, StructureConformance, StructureReport,
};
use tracing::instrument;
use walkdir::WalkDir;

use super::terminal::Colorize;

#[derive(Debug, Parser)]
#[command(about = "Check documents against the reference table of contents")]
pub struct Command {
    /// Documents, or directories to search for documents
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Read JSON paragraph dumps (`*.json`) instead of text files (`*.txt`)
    #[arg(long)]
    paragraphs: bool,

    /// Output format (table, json, markdown)
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
    Markdown,
}

type Outcome = anyhow::Result<StructureReport>;

impl Command {
    #[instrument(level = "debug", skip_all)]
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let documents = self.collect_documents()?;
        if documents.is_empty() {
            println!("No documents found.");
            return Ok(());
        }

        let checker = StructureConformance::new(config.reference_toc());
        let outcomes: Vec<(PathBuf, Outcome)> = documents
            .into_par_iter()
            .map(|path| {
                let outcome = self.check_document(&checker, &path);
                (path, outcome)
            })
            .collect();

        match self.output {
            OutputFormat::Json => Self::output_json(&outcomes)?,
            OutputFormat::Markdown => Self::output_markdown(&outcomes),
            OutputFormat::Table => Self::output_table(&outcomes),
        }

        // Exit with a non-zero code when a document needs attention.
        let mut exit_code = 0;
        for (_, outcome) in &outcomes {
            match outcome {
                Err(_) => exit_code = exit_code.max(3),
                Ok(report) if !report.is_conformant() => exit_code = exit_code.max(2),
                Ok(_) => {}
            }
        }

        if exit_code != 0 {
            process::exit(exit_code);
        }

        Ok(())
    }

    fn extension(&self) -> &'static str {
        if self.paragraphs { "json" } else { "txt" }
    }

    /// Expands directories into the documents they contain, in path order.
    fn collect_documents(&self) -> anyhow::Result<Vec<PathBuf>> {
        let mut documents = Vec::new();
        for path in &self.paths {
            if !path.is_dir() {
                documents.push(path.clone());
                continue;
            }

            let mut found = Vec::new();
            for entry in WalkDir::new(path) {
                let entry =
                    entry.with_context(|| format!("failed to walk {}", path.display()))?;
                let is_document = entry.file_type().is_file()
                    && entry
                        .path()
                        .extension()
                        .is_some_and(|extension| extension == self.extension());
                if is_document {
                    found.push(entry.into_path());
                }
            }
            found.sort();
            tracing::debug!("Found {} documents in {}", found.len(), path.display());
            documents.extend(found);
        }
        Ok(documents)
    }

    fn check_document(&self, checker: &StructureConformance<'_>, path: &Path) -> Outcome {
        let report = if self.paragraphs {
            let paragraphs = load_paragraphs(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            checker.check_paragraphs(&paragraphs)?
        } else {
            let text = load_document(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            checker.check_text(&text)?
        };
        Ok(report)
    }

    fn output_json(outcomes: &[(PathBuf, Outcome)]) -> anyhow::Result<()> {
        use serde_json::json;

        let output: Vec<_> = outcomes
            .iter()
            .map(|(path, outcome)| match outcome {
                Ok(report) => json!({
                    "document": path.display().to_string(),
                    "report": report,
                }),
                Err(error) => json!({
                    "document": path.display().to_string(),
                    "error": format!("{error:#}"),
                }),
            })
            .collect();

        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }

    fn output_markdown(outcomes: &[(PathBuf, Outcome)]) {
        for (path, outcome) in outcomes {
            let name = path.display().to_string();
            match outcome {
                Ok(report) => println!("{}\n", report_markdown(&name, report)),
                Err(error) => println!("# Structure Check: {name}\n\n> Error: {error:#}\n"),
            }
        }
    }

    fn output_table(outcomes: &[(PathBuf, Outcome)]) {
        for (path, outcome) in outcomes {
            let name = path.display().to_string();
            match outcome {
                Err(error) => {
                    println!("{} {}", "✗".error(), name);
                    println!("  {}", format!("{error:#}").error());
                }
                Ok(StructureReport::Skipped { reason }) => {
                    println!("{} {}", "−".warning(), name);
                    println!("  {}", format!("skipped: {reason}").warning());
                }
                Ok(StructureReport::Compared {
                    comparison,
                    narrative,
                    ..
                }) => {
                    let marker = if comparison.is_conformant() {
                        "✓".success()
                    } else {
                        "✗".warning()
                    };
                    let summary = format!(
                        "{} matched, {} missing, {} extra",
                        comparison.matched.len(),
                        comparison.missing.len(),
                        comparison.extra.len()
                    );
                    println!("{marker} {name} {}", summary.dim());
                    for entry in &comparison.missing {
                        println!("  {} {entry}", "missing".warning());
                    }
                    for entry in &comparison.extra {
                        println!("  {} {entry}", "extra".info());
                    }
                    if let Some(narrative) = narrative {
                        println!();
                        println!("{narrative}");
                    }
                }
            }
        }
    }
}
