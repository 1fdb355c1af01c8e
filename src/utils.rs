//! Shared path-derivation helpers and constants

/// Directory inside the archive that holds the per-file documents
pub const ARCHIVE_DIR: &str = "diffs";

/// Placeholder used as the "before" content of a newly added file
pub const NEW_FILE_PLACEHOLDER: &str = "This file did not exist before.";

/// Extension of a file path: the substring after the final `.`, provided
/// that dot sits past the first character. Dotfiles like `.gitignore` and
/// paths without a dot have no extension.
pub fn extension(path: &str) -> &str {
    match path.rfind('.') {
        Some(idx) if idx > 0 => &path[idx + 1..],
        _ => "",
    }
}

/// Last path segment, or the path itself when it contains no `/`
pub fn base_name(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}

/// Truncate a string to at most `max` characters, adding "..." when cut.
/// Counts characters rather than bytes so multi-byte text never splits
/// mid-character.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let keep: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{keep}...")
    }
}
