//! Supporting helpers: colored stderr prefixes.
//!
//! Colorization is centralized here; diagnostics elsewhere compose these
//! prefixes instead of touching owo_colors directly.

use owo_colors::OwoColorize;

fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

/// Prefix for fatal diagnostics on stderr.
pub fn error_prefix() -> String {
    if colors_enabled() {
        "error:".red().bold().to_string()
    } else {
        "error:".to_string()
    }
}

/// Prefix for friendly notes on stderr.
pub fn note_prefix() -> String {
    if colors_enabled() {
        "note:".yellow().bold().to_string()
    } else {
        "note:".to_string()
    }
}

/// Prefix for informational messages on stderr.
pub fn info_prefix() -> String {
    if colors_enabled() {
        "info:".blue().bold().to_string()
    } else {
        "info:".to_string()
    }
}
