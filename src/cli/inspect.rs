//! Inspect command: report what an export would contain, without
//! building the archive

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::extract::{DiffRecord, Extractor};
use crate::page::html::HtmlPage;
use crate::session::ExportSession;

/// Arguments for the inspect command
#[derive(Debug, clap::Args)]
pub struct InspectArgs {
    /// Saved HTML of the review page to inspect
    pub input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// One section of the report
#[derive(Debug, Serialize)]
pub struct SectionReport {
    pub file: String,
    pub base_name: String,
    pub extension: String,
    pub classification: &'static str,
    pub before_lines: usize,
    pub after_lines: usize,
}

/// Totals across the page
#[derive(Debug, Serialize)]
pub struct InspectSummary {
    pub total_sections: usize,
    pub skipped_sections: usize,
    pub normal: usize,
    pub new_files: usize,
    pub too_large: usize,
    pub not_inline: usize,
    pub binary_or_empty: usize,
}

/// Full report for one page
#[derive(Debug, Serialize)]
pub struct InspectReport {
    pub sections: Vec<SectionReport>,
    pub summary: InspectSummary,
}

/// Run the inspect command
pub fn run(args: InspectArgs) -> Result<()> {
    let html = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let mut page = HtmlPage::parse(&html);

    let extractor = Extractor::new();
    let session = ExportSession::collect(&mut page, &extractor, |_, _| {});

    let report = build_report(&session.records, session.skipped);
    let json = serde_json::to_string_pretty(&report)?;

    match &args.output {
        Some(path) => {
            let mut file = fs::File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            file.write_all(json.as_bytes())?;
            eprintln!(
                "Inspected {} sections, report written to {}",
                report.summary.total_sections,
                path.display()
            );
        }
        None => println!("{}", json),
    }

    Ok(())
}

fn build_report(records: &[DiffRecord], skipped: usize) -> InspectReport {
    let sections: Vec<SectionReport> = records
        .iter()
        .map(|record| SectionReport {
            file: record.file_path.clone(),
            base_name: record.base_name().to_string(),
            extension: record.extension().to_string(),
            classification: record.classification(),
            before_lines: count_lines(&record.before),
            after_lines: count_lines(&record.after),
        })
        .collect();

    let count = |label: &str| sections.iter().filter(|s| s.classification == label).count();
    let summary = InspectSummary {
        total_sections: sections.len() + skipped,
        skipped_sections: skipped,
        normal: count("normal"),
        new_files: count("new-file"),
        too_large: count("too-large"),
        not_inline: count("not-inline"),
        binary_or_empty: count("binary-or-empty"),
    };

    InspectReport { sections, summary }
}

fn count_lines(text: &str) -> usize {
    if text.is_empty() {
        0
    } else {
        text.lines().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(path: &str, before: &str, after: &str) -> DiffRecord {
        DiffRecord {
            file_path: path.to_string(),
            before: before.to_string(),
            after: after.to_string(),
            is_new_file: false,
            is_too_large: false,
            is_not_inline: false,
        }
    }

    #[test]
    fn test_report_summary_counts() {
        let mut too_large = record("dump.sql", "", "");
        too_large.is_too_large = true;

        let records = vec![
            record("src/a.rs", "old", "new\nnewer"),
            record("logo.png", "", ""),
            too_large,
        ];
        let report = build_report(&records, 1);

        assert_eq!(report.summary.total_sections, 4);
        assert_eq!(report.summary.skipped_sections, 1);
        assert_eq!(report.summary.normal, 1);
        assert_eq!(report.summary.binary_or_empty, 1);
        assert_eq!(report.summary.too_large, 1);
        assert_eq!(report.sections[0].before_lines, 1);
        assert_eq!(report.sections[0].after_lines, 2);
        assert_eq!(report.sections[0].extension, "rs");
    }
}
