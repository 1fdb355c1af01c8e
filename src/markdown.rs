//! Markdown rendering of diff records
//!
//! Pure string formatting; precedence mirrors the extractor's
//! classification so every record resolves to exactly one document shape.

use crate::extract::DiffRecord;

/// Body emitted when a diff never loads inline
pub const NOT_INLINE_MESSAGE: &str =
    "This diff is not rendered inline. Open the file directly on the review page to see its contents.";

/// Body emitted when the page refused to render the diff
pub const TOO_LARGE_MESSAGE: &str =
    "This diff was too large to render and could not be exported.";

/// Body emitted when neither side has any text
pub const EMPTY_MESSAGE: &str =
    "No textual changes to export (binary file or diff too large).";

/// Render one record as a standalone Markdown document.
///
/// Fenced blocks are tagged with the file's extension; an empty tag is
/// permitted when the path has none.
pub fn render(record: &DiffRecord) -> String {
    let heading = format!("# {}\n\n", record.base_name());
    let tag = record.extension();

    if record.is_not_inline {
        return format!("{heading}{NOT_INLINE_MESSAGE}\n");
    }

    if record.is_too_large {
        return format!("{heading}{TOO_LARGE_MESSAGE}\n");
    }

    if record.is_new_file {
        return format!(
            "{heading}## Before\n\n{}\n\n## After\n```{tag}\n{}\n```\n",
            record.before, record.after
        );
    }

    if record.before.is_empty() && record.after.is_empty() {
        return format!("{heading}{EMPTY_MESSAGE}\n");
    }

    format!(
        "{heading}## Before\n```{tag}\n{}\n```\n\n## After\n```{tag}\n{}\n```\n",
        record.before, record.after
    )
}
