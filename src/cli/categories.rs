use std::path::PathBuf;

use clap::Parser;
use srs_inspector::{
    domain::category::{detect_gaps, group_requirements},
    Config, Segmenter,
};
use tracing::instrument;

use super::{read_document, terminal::Colorize};

#[derive(Debug, Parser)]
#[command(about = "Group requirements by keyword category and report gaps")]
pub struct Command {
    /// The document to analyse
    file: PathBuf,

    /// Read the file as a JSON paragraph dump
    #[arg(long)]
    paragraphs: bool,
}

impl Command {
    #[instrument(level = "debug", skip(self, config), fields(file = %self.file.display()))]
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let text = read_document(&self.file, self.paragraphs)?;
        let requirements: Vec<_> = Segmenter::new(config.toc_scan_lines)
            .segment(&text)
            .into_iter()
            .flat_map(|section| section.requirements)
            .collect();

        let groups = group_requirements(&requirements, config.categories());

        for group in groups.iter().filter(|group| !group.requirements.is_empty()) {
            println!(
                "{} {}",
                group.category.info(),
                format!("({})", group.requirements.len()).dim()
            );
            for requirement in &group.requirements {
                println!("  {}", requirement.text);
            }
        }

        let gaps = detect_gaps(&groups);
        if gaps.is_empty() {
            println!("{}", "All expected categories are present.".success());
        } else {
            println!("{}", "Missing requirement categories:".warning());
            for gap in gaps {
                println!("  {gap}");
            }
        }
        Ok(())
    }
}
