//! Zip archive assembly and archive naming

use std::collections::HashMap;
use std::io::{Cursor, Write};

use anyhow::{Context, Result};
use zip::write::FileOptions;
use zip::ZipWriter;

use crate::utils::ARCHIVE_DIR;

/// Ordered collection of formatted documents, flushed to a zip in one go.
///
/// Entries land under `diffs/<baseName>.md`. Two records sharing a base
/// name are not deduplicated by path: the later document replaces the
/// earlier one's content while keeping its position in the archive.
#[derive(Debug, Default)]
pub struct ArchiveBuilder {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl ArchiveBuilder {
    pub fn new() -> Self {
        ArchiveBuilder::default()
    }

    /// Queue one Markdown document under `diffs/<base_name>.md`
    pub fn add_document(&mut self, base_name: &str, text: &str) {
        let name = format!("{ARCHIVE_DIR}/{base_name}.md");
        match self.index.get(&name) {
            Some(&slot) => self.entries[slot].1 = text.to_string(),
            None => {
                self.index.insert(name.clone(), self.entries.len());
                self.entries.push((name, text.to_string()));
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Compress every queued entry and return the archive bytes
    pub fn finish(self) -> Result<Vec<u8>> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options =
            FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        for (name, text) in self.entries {
            writer
                .start_file(name.as_str(), options)
                .with_context(|| format!("Failed to start archive entry {name}"))?;
            writer
                .write_all(text.as_bytes())
                .with_context(|| format!("Failed to write archive entry {name}"))?;
        }

        let cursor = writer.finish().context("Failed to finalize archive")?;
        Ok(cursor.into_inner())
    }
}

/// Identifiers pulled out of the review page's address, used to name the
/// downloaded archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLocation {
    pub repo: String,
    pub number: String,
}

impl PageLocation {
    /// Derive repository name and change number from a page address.
    ///
    /// With empty segments dropped, the repository slug is path segment 3
    /// and the change number segment 5 (0-indexed), the layout of
    /// `/projects/<key>/repos/<slug>/pull-requests/<number>/...` review
    /// pages.
    pub fn from_url(url: &str) -> Option<Self> {
        // Identifiers come from the pathname only; drop query and fragment
        let url = match url.find(|c| c == '?' || c == '#') {
            Some(end) => &url[..end],
            None => url,
        };

        let path = match url.find("://") {
            Some(scheme_end) => {
                let rest = &url[scheme_end + 3..];
                match rest.find('/') {
                    Some(host_end) => &rest[host_end..],
                    None => "",
                }
            }
            None => url,
        };

        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let repo = segments.get(3)?;
        let number = segments.get(5)?;

        Some(PageLocation {
            repo: repo.to_string(),
            number: number.to_string(),
        })
    }

    /// `<repo>-pr<number>-diffs.zip`
    pub fn archive_file_name(&self) -> String {
        format!("{}-pr{}-diffs.zip", self.repo, self.number)
    }
}
