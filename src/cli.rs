use std::path::{Path, PathBuf};

mod categories;
mod check;
mod config;
mod sections;
mod terminal;
mod toc;
mod trace;

use anyhow::Context;
use clap::ArgAction;
use srs_inspector::{
    storage::{load_document, load_paragraphs, paragraphs_to_text},
    Config,
};

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a TOML configuration file (built-in defaults when omitted)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let config = load_config(self.config.as_deref())?;
        self.command.run(&config)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    path.map_or_else(
        || Ok(Config::default()),
        |path| {
            let config = Config::load(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?;
            tracing::info!("Loaded config from {}", path.display());
            Ok(config)
        },
    )
}

/// Reads a document as text, either directly or from a JSON paragraph dump.
fn read_document(path: &Path, paragraphs: bool) -> anyhow::Result<String> {
    let text = if paragraphs {
        load_paragraphs(path).map(|paragraphs| paragraphs_to_text(&paragraphs))
    } else {
        load_document(path)
    };
    text.with_context(|| format!("failed to read {}", path.display()))
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Split documents into sections and requirement statements
    Sections(sections::Command),

    /// Print the table of contents found in a document
    Toc(toc::Command),

    /// Check documents against the reference table of contents
    ///
    /// Exits with status 2 when a document is missing reference sections or
    /// has no table of contents, and 3 when a document cannot be read.
    Check(check::Command),

    /// Export the requirement traceability index
    Trace(trace::Command),

    /// Group requirements by keyword category and report gaps
    Categories(categories::Command),

    /// Print the effective configuration
    Config,
}

impl Command {
    fn run(self, config: &Config) -> anyhow::Result<()> {
        match self {
            Self::Sections(command) => command.run(config)?,
            Self::Toc(command) => command.run()?,
            Self::Check(command) => command.run(config)?,
            Self::Trace(command) => command.run(config)?,
            Self::Categories(command) => command.run(config)?,
            Self::Config => config::show(config)?,
        }
        Ok(())
    }
}
