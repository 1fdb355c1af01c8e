//! Static HTML snapshot adapter
//!
//! Implements [`DiffPage`] over a saved copy of the review page, parsed
//! with `scraper`. The adapter encodes the external page's DOM contract
//! in one place:
//!
//! - file-diff section: any element with class `diff-section`
//! - file path: `data-path` attribute on the section, falling back to the
//!   text of an `a.file-link` descendant
//! - binary/rendered diff: a `.binary-note` descendant
//! - new-file label: `.file-badge` or `.file-header` text containing
//!   "new file" or "added" (case-insensitive)
//! - change lines: `.del-line` / `.add-line`; every content line carries
//!   `.diff-line`
//! - activatable controls are `button` and `summary` elements; plain `a`
//!   links are navigation-only
//!
//! A snapshot cannot re-render, so `settle` returns immediately and
//! activating a control has no observable effect. The bounded retry
//! protocols still terminate through their ceilings, which for an
//! unrendered diff is exactly the conservative outcome wanted.

use std::time::Duration;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::page::{DiffPage, InlineRequest, LineKind, SectionId, SectionMarker};

/// Control texts that expand lazily rendered page content
const EXPANSION_KEYWORDS: &str = r"(?i)load more|show more|expand";

/// Control texts that render a file's diff inline
const LOAD_DIFF_KEYWORDS: &str =
    r"(?i)load diff|view file|show diff|display the diff|load this diff|show this diff";

/// Badge or header texts labeling a newly added file
const NEW_FILE_KEYWORDS: &str = r"(?i)new file|added";

fn sel(css: &str) -> Selector {
    Selector::parse(css).unwrap()
}

struct Selectors {
    section: Selector,
    file_link: Selector,
    binary_note: Selector,
    badge: Selector,
    header: Selector,
    del_line: Selector,
    add_line: Selector,
    diff_line: Selector,
    control: Selector,
    link: Selector,
}

impl Selectors {
    fn new() -> Self {
        Selectors {
            section: sel(".diff-section"),
            file_link: sel("a.file-link"),
            binary_note: sel(".binary-note"),
            badge: sel(".file-badge"),
            header: sel(".file-header"),
            del_line: sel(".del-line"),
            add_line: sel(".add-line"),
            diff_line: sel(".diff-line"),
            control: sel("button, summary"),
            link: sel("a"),
        }
    }
}

/// Parsed page snapshot
pub struct HtmlPage {
    doc: Html,
    selectors: Selectors,
    expansion: Regex,
    load_diff: Regex,
    new_file: Regex,
}

impl HtmlPage {
    /// Parse a saved HTML document. Parsing is error-tolerant; a page
    /// with no recognizable sections simply yields an empty export.
    pub fn parse(html: &str) -> Self {
        HtmlPage {
            doc: Html::parse_document(html),
            selectors: Selectors::new(),
            expansion: Regex::new(EXPANSION_KEYWORDS).unwrap(),
            load_diff: Regex::new(LOAD_DIFF_KEYWORDS).unwrap(),
            new_file: Regex::new(NEW_FILE_KEYWORDS).unwrap(),
        }
    }

    fn section(&self, id: SectionId) -> Option<ElementRef<'_>> {
        self.doc.select(&self.selectors.section).nth(id)
    }

    fn line_texts(&self, section: ElementRef<'_>, selector: &Selector) -> Vec<String> {
        section
            .select(selector)
            .map(|el| el.text().collect::<String>())
            .collect()
    }
}

/// Element text with whitespace runs collapsed, for keyword matching
fn normalized_text(el: ElementRef<'_>) -> String {
    el.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

impl DiffPage for HtmlPage {
    fn section_count(&self) -> usize {
        self.doc.select(&self.selectors.section).count()
    }

    // View gestures are meaningless on a snapshot
    fn scroll_to_bottom(&mut self) {}

    fn restore_view(&mut self) {}

    fn expand_all(&mut self) -> usize {
        self.doc
            .select(&self.selectors.control)
            .filter(|el| self.expansion.is_match(&normalized_text(*el)))
            .count()
    }

    fn settle(&mut self, _wait: Duration) {
        // Nothing can change between observations of a snapshot
    }

    fn file_path(&self, id: SectionId) -> Option<String> {
        let section = self.section(id)?;

        if let Some(path) = section.value().attr("data-path") {
            if !path.is_empty() {
                return Some(path.to_string());
            }
        }

        let link = section.select(&self.selectors.file_link).next()?;
        let path = normalized_text(link);
        if path.is_empty() {
            None
        } else {
            Some(path)
        }
    }

    fn has_marker(&self, id: SectionId, marker: SectionMarker) -> bool {
        let Some(section) = self.section(id) else {
            return false;
        };
        match marker {
            SectionMarker::Binary => section.select(&self.selectors.binary_note).next().is_some(),
            SectionMarker::NewFile => {
                let badge = section
                    .select(&self.selectors.badge)
                    .any(|el| self.new_file.is_match(&normalized_text(el)));
                badge
                    || section
                        .select(&self.selectors.header)
                        .any(|el| self.new_file.is_match(&normalized_text(el)))
            }
        }
    }

    fn lines(&self, id: SectionId, kind: LineKind) -> Vec<String> {
        let Some(section) = self.section(id) else {
            return Vec::new();
        };
        let selector = match kind {
            LineKind::Deletion => &self.selectors.del_line,
            LineKind::Addition => &self.selectors.add_line,
            LineKind::Content => &self.selectors.diff_line,
        };
        self.line_texts(section, selector)
    }

    fn section_text(&self, id: SectionId) -> String {
        self.section(id).map(normalized_text).unwrap_or_default()
    }

    fn request_inline(&mut self, id: SectionId) -> InlineRequest {
        let Some(section) = self.section(id) else {
            return InlineRequest::Missing;
        };

        let control = section
            .select(&self.selectors.control)
            .any(|el| self.load_diff.is_match(&normalized_text(el)));
        if control {
            // Activating a control on a snapshot cannot load anything,
            // but report the gesture faithfully
            return InlineRequest::Activated;
        }

        let link_only = section
            .select(&self.selectors.link)
            .any(|el| self.load_diff.is_match(&normalized_text(el)));
        if link_only {
            return InlineRequest::NavigationOnly;
        }

        InlineRequest::Missing
    }
}
