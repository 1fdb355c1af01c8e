//! One export run
//!
//! All state for a single triggered export lives in an [`ExportSession`]
//! constructed for that run; nothing survives it. Records are collected
//! in document order, so the resulting archive is deterministic for a
//! fixed rendered page.

use crate::extract::{DiffRecord, Extractor};
use crate::page::{loader, DiffPage};

/// Records scraped by one export run, plus the sections that produced none
#[derive(Debug, Default)]
pub struct ExportSession {
    pub records: Vec<DiffRecord>,
    pub skipped: usize,
}

impl ExportSession {
    /// Expand the page to completion, then extract every section.
    ///
    /// `on_progress` is invoked as `(processed, total)` after each
    /// section, including skipped ones.
    pub fn collect<F>(
        page: &mut dyn DiffPage,
        extractor: &Extractor,
        mut on_progress: F,
    ) -> Self
    where
        F: FnMut(usize, usize),
    {
        let total = loader::load_all_sections(page);

        let mut session = ExportSession::default();
        for id in 0..total {
            match extractor.extract(page, id) {
                Some(record) => session.records.push(record),
                None => session.skipped += 1,
            }
            on_progress(id + 1, total);
        }

        session
    }

    /// Sections that produced a record
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
