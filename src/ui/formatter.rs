//! Pure formatting functions for UI output.
//!
//! Everything here writes to stderr so that stdout carries only the emitted
//! properties.

use crate::resolver::{ReleaseResolution, TimestampResolution};
use crate::warning::ResolutionWarning;
use console::style;

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

/// Display a resolution warning to the user.
pub fn display_warning(warning: &ResolutionWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Summary lines for a resolved release, without styling
pub fn release_summary(resolution: &ReleaseResolution) -> String {
    format!(
        "Release version:     {}\nDevelopment version: {}\nTag:                 {}",
        resolution.release_version, resolution.development_version, resolution.tag_name
    )
}

/// Summary lines for a composed timestamp version, without styling
pub fn timestamp_summary(resolution: &TimestampResolution) -> String {
    format!(
        "Timestamp: {}\nVersion:   {}",
        resolution.timestamp, resolution.version
    )
}

/// Display the resolved release.
pub fn display_release(resolution: &ReleaseResolution) {
    eprintln!("\n{}", style("Release:").bold());
    for line in release_summary(resolution).lines() {
        eprintln!("  {}", line);
    }
}

/// Display the composed timestamp and version.
pub fn display_timestamp(resolution: &TimestampResolution) {
    eprintln!("\n{}", style("Timestamp version:").bold());
    for line in timestamp_summary(resolution).lines() {
        eprintln!("  {}", line);
    }
}
