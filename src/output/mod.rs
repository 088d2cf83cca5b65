//! Output formatting for CLI display
//!
//! This module provides utilities for formatting output in the CLI:
//! tag/count lines and existence-colored filenames.

use colored::Colorize;

/// Format a tag with its occurrence count
#[must_use]
pub fn tag_with_count(tag: &str, count: usize) -> String {
    format!("{tag}: {count}")
}

/// Color a filename based on file existence (green if present, red if missing)
#[must_use]
pub fn colorize_filename(name: &str, exists: bool) -> String {
    if exists {
        name.green().to_string()
    } else {
        name.red().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_with_count() {
        assert_eq!(tag_with_count("red", 3), "red: 3");
    }

    #[test]
    fn test_colorize_filename_distinguishes_existence() {
        colored::control::set_override(true);
        let present = colorize_filename("a.txt", true);
        let missing = colorize_filename("a.txt", false);
        colored::control::unset_override();

        assert_ne!(present, missing);
    }
}
