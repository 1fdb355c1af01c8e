//! Page adapter contract
//!
//! Everything the rest of the crate knows about the review page goes
//! through [`DiffPage`]. The trait models the handful of structural facts
//! the exporter depends on: an ordered list of file-diff sections, a few
//! per-section markers and line kinds, and the two interactive gestures
//! (expanding lazily rendered content, requesting an inline diff). A
//! static HTML snapshot implements it in [`html`]; tests drive the loops
//! with a scripted fake instead of a real document.

pub mod html;
pub mod loader;
pub mod poll;

#[cfg(test)]
pub mod fake;

use std::time::Duration;

/// Index of a file-diff section, in document order
pub type SectionId = usize;

/// Structural markers a section may carry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionMarker {
    /// The diff is binary or otherwise rendered without text content
    Binary,
    /// The section is labeled as a newly added file
    NewFile,
}

/// The kinds of text lines a rendered diff section contains
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Lines removed by the change
    Deletion,
    /// Lines added by the change
    Addition,
    /// Every content line, regardless of change marker
    Content,
}

/// Result of searching a section for a load-diff control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineRequest {
    /// An activatable control (button or expandable summary) was triggered
    Activated,
    /// Only a navigation link matched; following it would leave the page
    NavigationOnly,
    /// No matching control exists in the section
    Missing,
}

/// Narrow view of the review page the exporter runs against.
///
/// Sections are addressed by their document-order index. Implementations
/// backed by a live, re-rendering document honor `settle` with a real
/// wait; snapshot-backed implementations may treat it as a no-op since
/// nothing can change between calls.
pub trait DiffPage {
    /// Number of file-diff sections currently rendered
    fn section_count(&self) -> usize;

    /// Scroll the view to the current bottom of the document
    fn scroll_to_bottom(&mut self);

    /// Restore the view to the top of the document
    fn restore_view(&mut self);

    /// Activate every control whose text matches the expansion keyword
    /// set ("load more", "show more", "expand"). Returns how many
    /// controls were activated.
    fn expand_all(&mut self) -> usize;

    /// Give the page time to re-render after a mutating gesture
    fn settle(&mut self, wait: Duration);

    /// File path announced by the section, if any
    fn file_path(&self, id: SectionId) -> Option<String>;

    /// Whether the section carries the given structural marker
    fn has_marker(&self, id: SectionId, marker: SectionMarker) -> bool;

    /// Text of every line of the given kind, in document order
    fn lines(&self, id: SectionId, kind: LineKind) -> Vec<String>;

    /// Full visible text of the section, for message heuristics
    fn section_text(&self, id: SectionId) -> String;

    /// Search the section for a load-diff control and activate it when
    /// one is found
    fn request_inline(&mut self, id: SectionId) -> InlineRequest;
}
