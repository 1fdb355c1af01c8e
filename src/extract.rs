//! Diff extraction and classification
//!
//! Walks one file-diff section and turns it into an immutable
//! [`DiffRecord`]. Classification precedence is fixed: binary wins over
//! everything, a new-file label wins over line inspection, and only a
//! section with neither deletion nor addition lines enters the bounded
//! load-diff protocol.

use std::time::Duration;

use regex::Regex;
use serde::Serialize;

use crate::page::{DiffPage, InlineRequest, LineKind, SectionId, SectionMarker};
use crate::utils::{self, NEW_FILE_PLACEHOLDER};

/// Attempts made to get a diff rendered inline before giving up
pub const LOAD_ATTEMPTS: usize = 5;

/// Wait after activating a load-diff control
pub const LOAD_SETTLE: Duration = Duration::from_millis(1200);

/// Pattern confirming the page refused to render a diff for size reasons
const TOO_LARGE_PATTERN: &str = r"(?i)too large";

/// One changed file, as scraped from the page. Produced once by the
/// extractor and consumed once by the formatter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffRecord {
    pub file_path: String,
    pub before: String,
    pub after: String,
    pub is_new_file: bool,
    pub is_too_large: bool,
    pub is_not_inline: bool,
}

impl DiffRecord {
    fn empty(file_path: String) -> Self {
        DiffRecord {
            file_path,
            before: String::new(),
            after: String::new(),
            is_new_file: false,
            is_too_large: false,
            is_not_inline: false,
        }
    }

    /// Extension of the file, derived from the path; may be empty
    pub fn extension(&self) -> &str {
        utils::extension(&self.file_path)
    }

    /// Last segment of the file path
    pub fn base_name(&self) -> &str {
        utils::base_name(&self.file_path)
    }

    /// The formatting outcome this record will resolve to, as a label.
    /// Mirrors the formatter's precedence order.
    pub fn classification(&self) -> &'static str {
        if self.is_not_inline {
            "not-inline"
        } else if self.is_too_large {
            "too-large"
        } else if self.is_new_file {
            "new-file"
        } else if self.before.is_empty() && self.after.is_empty() {
            "binary-or-empty"
        } else {
            "normal"
        }
    }
}

/// How the load-diff protocol ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InlineOutcome {
    Loaded,
    NotInline,
    TooLarge,
}

/// Section classifier. Holds the compiled message heuristics so a single
/// instance serves a whole export run.
pub struct Extractor {
    too_large: Regex,
}

impl Default for Extractor {
    fn default() -> Self {
        Extractor::new()
    }
}

impl Extractor {
    pub fn new() -> Self {
        Extractor {
            too_large: Regex::new(TOO_LARGE_PATTERN).unwrap(),
        }
    }

    /// Produce a record for one section, or `None` when the section
    /// announces no file path and is skipped.
    pub fn extract(&self, page: &mut dyn DiffPage, id: SectionId) -> Option<DiffRecord> {
        let file_path = page.file_path(id)?;

        if page.has_marker(id, SectionMarker::Binary) {
            return Some(DiffRecord::empty(file_path));
        }

        if page.has_marker(id, SectionMarker::NewFile) {
            let after = page.lines(id, LineKind::Content).join("\n");
            return Some(DiffRecord {
                before: NEW_FILE_PLACEHOLDER.to_string(),
                after,
                is_new_file: true,
                ..DiffRecord::empty(file_path)
            });
        }

        let mut deletions = page.lines(id, LineKind::Deletion);
        let mut additions = page.lines(id, LineKind::Addition);

        // No change lines at all: the diff has not been rendered inline yet
        if deletions.is_empty() && additions.is_empty() {
            match self.ensure_inline(page, id) {
                InlineOutcome::NotInline => {
                    return Some(DiffRecord {
                        is_not_inline: true,
                        ..DiffRecord::empty(file_path)
                    });
                }
                InlineOutcome::TooLarge => {
                    return Some(DiffRecord {
                        is_too_large: true,
                        ..DiffRecord::empty(file_path)
                    });
                }
                InlineOutcome::Loaded => {
                    deletions = page.lines(id, LineKind::Deletion);
                    additions = page.lines(id, LineKind::Addition);
                }
            }
        }

        Some(DiffRecord {
            before: deletions.join("\n"),
            after: additions.join("\n"),
            ..DiffRecord::empty(file_path)
        })
    }

    /// Bounded attempt to get the section's diff rendered inline.
    ///
    /// A navigation-only match means the diff can never load in place, so
    /// retrying is pointless. When every attempt is exhausted without the
    /// content confirming as loaded, the section is treated as too large;
    /// that is the conservative reading of an unconfirmed diff.
    fn ensure_inline(&self, page: &mut dyn DiffPage, id: SectionId) -> InlineOutcome {
        for _ in 0..LOAD_ATTEMPTS {
            match page.request_inline(id) {
                InlineRequest::NavigationOnly => return InlineOutcome::NotInline,
                InlineRequest::Activated => page.settle(LOAD_SETTLE),
                InlineRequest::Missing => {
                    if !page.lines(id, LineKind::Deletion).is_empty()
                        || !page.lines(id, LineKind::Addition).is_empty()
                    {
                        return InlineOutcome::Loaded;
                    }
                    if self.too_large.is_match(&page.section_text(id)) {
                        return InlineOutcome::TooLarge;
                    }
                }
            }
        }

        InlineOutcome::TooLarge
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::fake::{FakePage, FakeSection};

    fn extract_first(page: &mut FakePage) -> Option<DiffRecord> {
        Extractor::new().extract(page, 0)
    }

    #[test]
    fn test_normal_section() {
        let mut section = FakeSection::with_path("src/app.py");
        section.deletions = vec!["foo".to_string()];
        section.additions = vec!["bar".to_string()];
        let mut page = FakePage::new(vec![section]);

        let record = extract_first(&mut page).unwrap();
        assert_eq!(record.before, "foo");
        assert_eq!(record.after, "bar");
        assert_eq!(record.classification(), "normal");
        assert_eq!(record.extension(), "py");
        assert_eq!(record.base_name(), "app.py");
    }

    #[test]
    fn test_section_without_path_is_skipped() {
        let mut page = FakePage::new(vec![FakeSection::default()]);
        assert!(extract_first(&mut page).is_none());
    }

    #[test]
    fn test_binary_section() {
        let mut section = FakeSection::with_path("logo.png");
        section.binary = true;
        let mut page = FakePage::new(vec![section]);

        let record = extract_first(&mut page).unwrap();
        assert!(record.before.is_empty());
        assert!(record.after.is_empty());
        assert!(!record.is_new_file);
        assert_eq!(record.classification(), "binary-or-empty");
    }

    #[test]
    fn test_binary_wins_over_new_file_label() {
        let mut section = FakeSection::with_path("logo.png");
        section.binary = true;
        section.new_file = true;
        section.contents = vec!["raw bytes".to_string()];
        let mut page = FakePage::new(vec![section]);

        let record = extract_first(&mut page).unwrap();
        assert!(!record.is_new_file);
        assert!(record.after.is_empty());
    }

    #[test]
    fn test_new_file_section() {
        let mut section = FakeSection::with_path("README.md");
        section.new_file = true;
        section.contents = vec!["# Title".to_string(), "body".to_string()];
        let mut page = FakePage::new(vec![section]);

        let record = extract_first(&mut page).unwrap();
        assert!(record.is_new_file);
        assert_eq!(record.before, NEW_FILE_PLACEHOLDER);
        assert_eq!(record.after, "# Title\nbody");
    }

    #[test]
    fn test_navigation_only_control_means_not_inline() {
        let mut section = FakeSection::with_path("vendor/big.js");
        section.inline_replies = vec![InlineRequest::NavigationOnly].into();
        let mut page = FakePage::new(vec![section]);

        let record = extract_first(&mut page).unwrap();
        assert!(record.is_not_inline);
        assert!(!record.is_too_large);
        // No retry after a navigation-only match
        assert!(page.settles.is_empty());
    }

    #[test]
    fn test_activation_loads_diff_inline() {
        let mut section = FakeSection::with_path("src/lib.rs");
        section.inline_replies = vec![InlineRequest::Activated].into();
        section.deferred = Some((vec!["old".to_string()], vec!["new".to_string()]));
        let mut page = FakePage::new(vec![section]);

        let record = extract_first(&mut page).unwrap();
        assert_eq!(record.before, "old");
        assert_eq!(record.after, "new");
        assert_eq!(record.classification(), "normal");
        assert_eq!(page.settles, vec![LOAD_SETTLE]);
    }

    #[test]
    fn test_too_large_message_confirms_classification() {
        let mut section = FakeSection::with_path("data/dump.sql");
        section.text = "This diff is too large to render.".to_string();
        let mut page = FakePage::new(vec![section]);

        let record = extract_first(&mut page).unwrap();
        assert!(record.is_too_large);
        assert_eq!(record.classification(), "too-large");
    }

    #[test]
    fn test_exhausted_attempts_fall_back_to_too_large() {
        // Five activations, nothing ever loads, no message either
        let mut section = FakeSection::with_path("huge.bin.txt");
        section.inline_replies = vec![InlineRequest::Activated; LOAD_ATTEMPTS].into();
        let mut page = FakePage::new(vec![section]);

        let record = extract_first(&mut page).unwrap();
        assert!(record.is_too_large);
        assert_eq!(page.settles.len(), LOAD_ATTEMPTS);
    }

    #[test]
    fn test_deletion_only_diff() {
        let mut section = FakeSection::with_path("old.cfg");
        section.deletions = vec!["gone".to_string(), "also gone".to_string()];
        let mut page = FakePage::new(vec![section]);

        let record = extract_first(&mut page).unwrap();
        assert_eq!(record.before, "gone\nalso gone");
        assert_eq!(record.after, "");
        assert_eq!(record.classification(), "normal");
    }
}
