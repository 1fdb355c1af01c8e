//! Scripted in-memory page for exercising the loops without a document

use std::collections::VecDeque;
use std::time::Duration;

use crate::page::{DiffPage, InlineRequest, LineKind, SectionId, SectionMarker};

/// One scripted file-diff section
#[derive(Debug, Default, Clone)]
pub struct FakeSection {
    pub path: Option<String>,
    pub binary: bool,
    pub new_file: bool,
    pub deletions: Vec<String>,
    pub additions: Vec<String>,
    pub contents: Vec<String>,
    pub text: String,
    /// Replies returned by successive `request_inline` calls; exhausted
    /// replies fall back to `Missing`
    pub inline_replies: VecDeque<InlineRequest>,
    /// Lines that become visible after an activation settles
    pub deferred: Option<(Vec<String>, Vec<String>)>,
    activated: bool,
}

impl FakeSection {
    pub fn with_path(path: &str) -> Self {
        FakeSection {
            path: Some(path.to_string()),
            ..FakeSection::default()
        }
    }
}

/// Scripted page: a vector of sections plus bookkeeping on the gestures
/// the loops performed against it.
#[derive(Debug, Default)]
pub struct FakePage {
    pub sections: Vec<FakeSection>,
    /// Empty sections appended per expansion pass while the budget lasts
    pub grow_budget: usize,
    pub expand_calls: usize,
    pub settles: Vec<Duration>,
    pub restored: bool,
}

impl FakePage {
    pub fn new(sections: Vec<FakeSection>) -> Self {
        FakePage {
            sections,
            ..FakePage::default()
        }
    }
}

impl DiffPage for FakePage {
    fn section_count(&self) -> usize {
        self.sections.len()
    }

    fn scroll_to_bottom(&mut self) {}

    fn restore_view(&mut self) {
        self.restored = true;
    }

    fn expand_all(&mut self) -> usize {
        self.expand_calls += 1;
        if self.grow_budget > 0 {
            self.grow_budget -= 1;
            self.sections.push(FakeSection::with_path("grown.txt"));
            1
        } else {
            0
        }
    }

    fn settle(&mut self, wait: Duration) {
        self.settles.push(wait);
        // An activation that was pending takes effect once the page has
        // had time to re-render
        for section in &mut self.sections {
            if section.activated {
                if let Some((deletions, additions)) = section.deferred.take() {
                    section.deletions = deletions;
                    section.additions = additions;
                }
            }
        }
    }

    fn file_path(&self, id: SectionId) -> Option<String> {
        self.sections.get(id)?.path.clone()
    }

    fn has_marker(&self, id: SectionId, marker: SectionMarker) -> bool {
        let Some(section) = self.sections.get(id) else {
            return false;
        };
        match marker {
            SectionMarker::Binary => section.binary,
            SectionMarker::NewFile => section.new_file,
        }
    }

    fn lines(&self, id: SectionId, kind: LineKind) -> Vec<String> {
        let Some(section) = self.sections.get(id) else {
            return Vec::new();
        };
        match kind {
            LineKind::Deletion => section.deletions.clone(),
            LineKind::Addition => section.additions.clone(),
            LineKind::Content => section.contents.clone(),
        }
    }

    fn section_text(&self, id: SectionId) -> String {
        self.sections
            .get(id)
            .map(|s| s.text.clone())
            .unwrap_or_default()
    }

    fn request_inline(&mut self, id: SectionId) -> InlineRequest {
        let Some(section) = self.sections.get_mut(id) else {
            return InlineRequest::Missing;
        };
        let reply = section
            .inline_replies
            .pop_front()
            .unwrap_or(InlineRequest::Missing);
        if reply == InlineRequest::Activated {
            section.activated = true;
        }
        reply
    }
}
