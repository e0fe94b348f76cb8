//! Pure formatting functions for UI output.
//!
//! Everything here prints to stderr; stdout is reserved for the version or
//! changelog text so the binary can be used in pipelines.

use console::style;

use crate::boundary::BoundaryWarning;
use crate::domain::Version;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    eprintln!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    eprintln!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow().bold(), warning);
}

/// Display the version change produced by a run.
///
/// Shows "From: base -> To: new", or only the version when nothing changed.
pub fn display_version_change(base: &Version, new: &Version) {
    if base == new {
        eprintln!("  Version: {}", style(new).green().bold());
    } else {
        eprintln!(
            "  From: {}  To: {}",
            style(base).red(),
            style(new).green().bold()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_error() {
        // Visual verification test - output is printed to stderr
        display_error("test error");
    }

    #[test]
    fn test_display_status() {
        display_status("test status");
    }

    #[test]
    fn test_display_version_change() {
        display_version_change(&Version::new(1, 0, 0), &Version::new(1, 1, 0));
        display_version_change(&Version::new(1, 0, 0), &Version::new(1, 0, 0));
    }
}
