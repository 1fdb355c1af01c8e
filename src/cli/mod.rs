pub mod export;
pub mod inspect;
pub mod progress;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// Export pull-request diffs from a saved review page
#[derive(Debug, Parser)]
#[command(name = "prbundle")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Bundle every file diff on the page into a zip of Markdown documents
    Export(export::ExportArgs),

    /// Report what an export would contain, as JSON
    Inspect(inspect::InspectArgs),
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Export(args) => export::run(args),
        Commands::Inspect(args) => inspect::run(args),
    }
}
