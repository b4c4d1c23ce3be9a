use std::path::PathBuf;

use clap::Parser;
use srs_inspector::{Config, Section, Segmenter};
use tracing::instrument;

use super::{
    read_document,
    terminal::{fit, Colorize},
};

#[derive(Debug, Parser)]
#[command(about = "Split documents into sections and requirement statements")]
pub struct Command {
    /// Documents to segment
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Read the files as JSON paragraph dumps
    #[arg(long)]
    paragraphs: bool,

    /// Output format (table, json)
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl Command {
    #[instrument(level = "debug", skip_all)]
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let segmenter = Segmenter::new(config.toc_scan_lines);

        let mut documents = Vec::with_capacity(self.files.len());
        for path in self.files {
            let text = read_document(&path, self.paragraphs)?;
            documents.push((path, segmenter.segment(&text)));
        }

        match self.output {
            OutputFormat::Json => Self::output_json(&documents)?,
            OutputFormat::Table => Self::output_table(&documents),
        }
        Ok(())
    }

    fn output_json(documents: &[(PathBuf, Vec<Section>)]) -> anyhow::Result<()> {
        use serde_json::json;

        let output: Vec<_> = documents
            .iter()
            .map(|(path, sections)| {
                json!({
                    "document": path.display().to_string(),
                    "sections": sections,
                })
            })
            .collect();

        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }

    fn output_table(documents: &[(PathBuf, Vec<Section>)]) {
        for (path, sections) in documents {
            println!("{}", path.display().to_string().info());

            if sections.is_empty() {
                println!("  {}", "No sections recognised.".warning());
                println!();
                continue;
            }

            for section in sections {
                let lines = if section.body.is_empty() {
                    0
                } else {
                    section.body.lines().count()
                };
                let summary = format!(
                    "({lines} lines, {} requirements)",
                    section.requirements.len()
                );
                println!("  {} {}", section.display_title(), summary.dim());
                for requirement in &section.requirements {
                    println!("    {}", fit(&requirement.text, 4));
                }
            }
            println!();
        }
    }
}
