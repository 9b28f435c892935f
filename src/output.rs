//! CLI status-line formatting.
//!
//! One build pass narrates itself incrementally — a blue banner when
//! checking starts, a plain `- ` item line per action taken, and a
//! single summary line at the end:
//!
//! ```text
//! Checking for updates ...
//! - Made build directory: _build
//! - Copied ./_static/styles.css to _build/_static/styles.css
//! - Built _build/index.html from ./index.md
//! ... Build complete!
//! ```
//!
//! or, when nothing was stale:
//!
//! ```text
//! Checking for updates ...
//! ... no updates to build.
//! ```
//!
//! `format_*` functions are pure and unit-tested; `print_*` wrappers
//! write to stdout (errors go to stderr in `main`). No logging crate —
//! stdout *is* the build log for an interactive tool this size.

use std::fmt::Display;

pub const BLUE: &str = "\x1b[94m";
pub const YELLOW: &str = "\x1b[93m";
pub const RED: &str = "\x1b[91m";
pub const RESET: &str = "\x1b[0m";

/// Banner printed before the build pass starts.
pub fn format_checking() -> String {
    format!("{BLUE}Checking for updates ...{RESET}")
}

/// Item line for one action taken during the pass.
pub fn format_item(message: impl Display) -> String {
    format!("- {message}")
}

/// Closing summary: did any artifact get written this pass?
pub fn format_summary(updates: bool) -> String {
    if updates {
        format!("{BLUE}... {YELLOW}Build complete!{RESET}")
    } else {
        format!("{BLUE}... no updates to build.{RESET}")
    }
}

/// Error line for fatal failures.
pub fn format_error(message: impl Display) -> String {
    format!("{RED}ERROR: {message}{RESET}")
}

pub fn print_checking() {
    println!("{}", format_checking());
}

pub fn print_item(message: impl Display) {
    println!("{}", format_item(message));
}

pub fn print_summary(updates: bool) {
    println!("{}", format_summary(updates));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checking_banner_is_blue() {
        let line = format_checking();
        assert!(line.starts_with(BLUE));
        assert!(line.contains("Checking for updates"));
        assert!(line.ends_with(RESET));
    }

    #[test]
    fn item_lines_are_dashed() {
        assert_eq!(format_item("Built a from b"), "- Built a from b");
    }

    #[test]
    fn summary_distinguishes_updates() {
        assert!(format_summary(true).contains("Build complete!"));
        assert!(format_summary(false).contains("no updates to build."));
    }

    #[test]
    fn errors_are_red() {
        let line = format_error("boom");
        assert!(line.starts_with(RED));
        assert!(line.contains("ERROR: boom"));
    }
}
