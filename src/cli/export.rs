//! Export command: scrape the page, format every diff, save the archive

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::archive::{ArchiveBuilder, PageLocation};
use crate::cli::progress::ProgressReporter;
use crate::extract::Extractor;
use crate::markdown;
use crate::page::html::HtmlPage;
use crate::session::ExportSession;

/// Arguments for the export command
#[derive(Debug, clap::Args)]
pub struct ExportArgs {
    /// Saved HTML of the review page to export
    pub input: PathBuf,

    /// Address the page was saved from, used to name the archive
    #[arg(long)]
    pub url: Option<String>,

    /// Where to write the archive (default: derived from --url or the input name)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

/// Run the export command
pub fn run(args: ExportArgs) -> Result<()> {
    let html = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let mut page = HtmlPage::parse(&html);

    // The reporter clears its line on drop, whichever way this returns
    let progress = ProgressReporter::new(args.quiet);
    progress.status("Loading all diffs...");

    let extractor = Extractor::new();
    let session = ExportSession::collect(&mut page, &extractor, |processed, total| {
        progress.update(processed, total, None);
    });

    let mut archive = ArchiveBuilder::new();
    for record in &session.records {
        archive.add_document(record.base_name(), &markdown::render(record));
    }
    let entry_count = archive.len();
    let bytes = archive.finish().context("Failed to build archive")?;

    let out_path = args
        .output
        .clone()
        .unwrap_or_else(|| default_output(&args.input, args.url.as_deref()));
    fs::write(&out_path, &bytes)
        .with_context(|| format!("Failed to write {}", out_path.display()))?;

    drop(progress);
    println!("Exported {} diffs to {}", entry_count, out_path.display());
    if session.skipped > 0 {
        println!(
            "Skipped {} section(s) without a recognizable file path",
            session.skipped
        );
    }

    Ok(())
}

/// Archive path when `-o` is absent: `{repo}-pr{number}-diffs.zip` from the
/// page address, else the input file's stem
fn default_output(input: &Path, url: Option<&str>) -> PathBuf {
    if let Some(url) = url {
        match PageLocation::from_url(url) {
            Some(location) => return PathBuf::from(location.archive_file_name()),
            None => eprintln!("Could not derive an archive name from {url}, using the input name"),
        }
    }

    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("export");
    PathBuf::from(format!("{stem}-diffs.zip"))
}
