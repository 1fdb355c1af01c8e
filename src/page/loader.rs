//! Page loading convergence loop
//!
//! Review pages render file diffs lazily: sections appear as the view is
//! scrolled and as "load more" style controls are activated. Before
//! extraction starts, the loader keeps nudging the page until the section
//! count stops moving.

use std::time::Duration;

use crate::page::poll::{poll_until_stable, PollOutcome};
use crate::page::DiffPage;

/// Ceiling on expansion passes; hitting it means "as complete as achievable"
pub const MAX_EXPAND_PASSES: usize = 50;

/// Consecutive unchanged counts required to call the page stable
pub const STABLE_PASSES: usize = 3;

/// Wait after each expansion pass for the page to re-render
pub const EXPAND_SETTLE: Duration = Duration::from_millis(800);

/// Expand the page until the file-diff section count stabilizes, then
/// restore the view to the top. Returns the final section count. A ceiling
/// hit is not a failure; extraction proceeds with whatever is rendered.
pub fn load_all_sections(page: &mut dyn DiffPage) -> usize {
    let outcome: PollOutcome<usize> = poll_until_stable(
        |_| {
            page.scroll_to_bottom();
            page.expand_all();
            page.settle(EXPAND_SETTLE);
            page.section_count()
        },
        STABLE_PASSES,
        MAX_EXPAND_PASSES,
    );

    page.restore_view();
    outcome.value
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::fake::{FakePage, FakeSection};

    #[test]
    fn test_stops_once_count_is_stable() {
        // Two sections appear during expansion, then the page settles
        let mut page = FakePage::new(vec![FakeSection::with_path("a.rs")]);
        page.grow_budget = 2;

        let count = load_all_sections(&mut page);

        assert_eq!(count, 3);
        assert!(page.restored);
        // 3 growth passes plus the stability streak, well under the ceiling
        assert!(page.expand_calls < MAX_EXPAND_PASSES);
    }

    #[test]
    fn test_terminates_at_ceiling_on_ever_growing_page() {
        let mut page = FakePage::new(Vec::new());
        page.grow_budget = usize::MAX;

        let count = load_all_sections(&mut page);

        assert_eq!(page.expand_calls, MAX_EXPAND_PASSES);
        assert_eq!(count, MAX_EXPAND_PASSES);
        assert!(page.restored);
    }

    #[test]
    fn test_static_page_converges_quickly() {
        let sections = vec![
            FakeSection::with_path("a.rs"),
            FakeSection::with_path("b.rs"),
        ];
        let mut page = FakePage::new(sections);

        let count = load_all_sections(&mut page);

        assert_eq!(count, 2);
        assert_eq!(page.expand_calls, STABLE_PASSES + 1);
    }
}
