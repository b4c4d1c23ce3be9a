use std::path::PathBuf;

use clap::Parser;
use srs_inspector::{
    storage::export::{traceability_csv, traceability_json, traceability_markdown},
    Config, Segmenter, TraceabilityIndex,
};
use tracing::instrument;

use super::{read_document, terminal::Colorize};

#[derive(Debug, Parser)]
#[command(about = "Export the requirement traceability index")]
pub struct Command {
    /// The document to index
    file: PathBuf,

    /// Read the file as a JSON paragraph dump
    #[arg(long)]
    paragraphs: bool,

    /// Export format (json, csv, markdown)
    #[arg(long, value_name = "FORMAT", default_value = "json")]
    format: ExportFormat,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum ExportFormat {
    #[default]
    Json,
    Csv,
    Markdown,
}

impl Command {
    #[instrument(level = "debug", skip(self, config), fields(file = %self.file.display()))]
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let text = read_document(&self.file, self.paragraphs)?;
        let sections = Segmenter::new(config.toc_scan_lines).segment(&text);
        let index = TraceabilityIndex::build(&sections);

        // The index keeps only the last occurrence of an id, so say which
        // earlier statements were dropped.
        for collision in index.collisions() {
            eprintln!(
                "{} {} in '{}' replaced the one in '{}'",
                "duplicate".warning(),
                collision.id,
                collision.replacement.section_title,
                collision.previous.section_title
            );
        }

        match self.format {
            ExportFormat::Json => println!("{}", traceability_json(&index)?),
            ExportFormat::Csv => print!("{}", traceability_csv(&index)),
            ExportFormat::Markdown => print!("{}", traceability_markdown(&sections)),
        }
        Ok(())
    }
}
