//! Pure formatting functions for UI output.
//!
//! Status lines go to stderr; stdout is reserved for pipeline output commands.

use console::style;

use crate::boundary::BoundaryWarning;
use crate::engine::VersionComparisonResult;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    eprintln!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    eprintln!("{} {}", style("→").yellow(), message);
}

/// Display a non-fatal warning.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("WARNING:").yellow().bold(), warning);
}

/// One-line summary of a comparison, e.g. `source 1.2.4 is ahead of deployed 1.2.3`
pub fn comparison_summary(
    deployed: &str,
    source: &str,
    result: VersionComparisonResult,
) -> String {
    let relation = match result {
        VersionComparisonResult::Ahead => "is ahead of",
        VersionComparisonResult::Equal => "is equal to",
        VersionComparisonResult::NotAhead => "is behind",
    };
    format!("source {} {} deployed {}", source, relation, deployed)
}

/// Display the comparison verdict, green when the source is ahead.
pub fn display_comparison(deployed: &str, source: &str, result: VersionComparisonResult) {
    let summary = comparison_summary(deployed, source, result);
    if result == VersionComparisonResult::Ahead {
        display_success(&summary);
    } else {
        display_status(&summary);
    }
}

/// Display the proposed version change.
pub fn display_proposed_version(deployed: &str, next: &str) {
    eprintln!("\n{}", style("Proposed appVersion:").bold());
    eprintln!("  From: {}", style(deployed).red());
    eprintln!("  To:   {}", style(next).green());
}
