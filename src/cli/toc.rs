use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use srs_inspector::{
    domain::toc::{extract_from_paragraphs, extract_from_text},
    storage::{load_document, load_paragraphs},
};
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, Parser)]
#[command(about = "Print the table of contents found in a document")]
pub struct Command {
    /// The document to read
    file: PathBuf,

    /// Read the file as a JSON paragraph dump and use paragraph styles
    #[arg(long)]
    paragraphs: bool,
}

impl Command {
    #[instrument(level = "debug", skip(self), fields(file = %self.file.display()))]
    pub fn run(self) -> anyhow::Result<()> {
        let entries = if self.paragraphs {
            load_paragraphs(&self.file).map(|paragraphs| extract_from_paragraphs(&paragraphs))
        } else {
            load_document(&self.file).map(|text| extract_from_text(&text))
        };
        let entries =
            entries.with_context(|| format!("failed to read {}", self.file.display()))?;

        if entries.is_empty() {
            println!("{}", "No table of contents found.".warning());
            return Ok(());
        }

        for entry in entries {
            println!("{entry}");
        }
        Ok(())
    }
}
