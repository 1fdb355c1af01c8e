//! Terminal progress display
//!
//! A single status line on stderr, rewritten in place. The reporter
//! clears its line when dropped, so every exit path of an export run
//! leaves the terminal clean.

use std::io::Write;

use colored::Colorize;

use crate::utils::truncate;

/// Width the status line is padded to before the carriage return
const LINE_WIDTH: usize = 68;

/// Longest message shown on the status line; the rest is the percentage
const MESSAGE_WIDTH: usize = LINE_WIDTH - 8;

/// `round(processed/total × 100)`, or 0 when there is no total
pub fn percent(processed: usize, total: usize) -> u32 {
    if total == 0 {
        0
    } else {
        ((processed as f64 / total as f64) * 100.0).round() as u32
    }
}

/// Rewritable status line; inert when quiet or not attached to a TTY
pub struct ProgressReporter {
    enabled: bool,
}

impl ProgressReporter {
    pub fn new(quiet: bool) -> Self {
        ProgressReporter {
            enabled: !quiet && atty::is(atty::Stream::Stderr),
        }
    }

    /// Show a plain status message
    pub fn status(&self, message: &str) {
        self.write_line(&truncate(message, MESSAGE_WIDTH).dimmed().to_string());
    }

    /// Show percentage progress, optionally overriding the message
    pub fn update(&self, processed: usize, total: usize, message: Option<&str>) {
        let pct = percent(processed, total);
        let message = truncate(message.unwrap_or("Exporting diffs"), MESSAGE_WIDTH);
        let text = format!("{} {}", format!("{pct:>3}%").bold(), message.dimmed());
        self.write_line(&text);
    }

    /// Erase the status line
    pub fn clear(&self) {
        if self.enabled {
            eprint!("\r{:LINE_WIDTH$}\r", "");
            let _ = std::io::stderr().flush();
        }
    }

    fn write_line(&self, text: &str) {
        if self.enabled {
            eprint!("\r{text:<LINE_WIDTH$}");
            let _ = std::io::stderr().flush();
        }
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent() {
        assert_eq!(percent(0, 0), 0);
        assert_eq!(percent(0, 10), 0);
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(2, 3), 67);
        assert_eq!(percent(10, 10), 100);
    }
}
