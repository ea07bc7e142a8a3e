// src/utils/console.rs

//! Console report output with server-style formatting.
//!
//! Diagnostics go through the `log` facade; this module prints the
//! human-facing run summary and can be silenced as a whole.

use std::sync::OnceLock;

use chrono::Local;

/// Whether console output is enabled
static ENABLED: OnceLock<bool> = OnceLock::new();

/// Initialize console output. Only the first call takes effect.
pub fn init(enabled: bool) {
    let _ = ENABLED.set(enabled);
}

fn enabled() -> bool {
    ENABLED.get().copied().unwrap_or(true)
}

/// Format a line with timestamp and tag
fn format_line(tag: &str, message: &str) -> String {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
    format!("[{}] [{}] {}", timestamp, tag, message)
}

/// Print a header
pub fn header(title: &str) {
    if enabled() {
        let border = "═".repeat(60);
        println!("{}", format_line("INFO", &border));
        println!("{}", format_line("INFO", &format!("  {}", title)));
        println!("{}", format_line("INFO", &border));
    }
}

/// Print a success message
pub fn success(message: &str) {
    if enabled() {
        println!("{}", format_line("INFO", &format!("✓ {}", message)));
    }
}

/// Print a sub-item (indented)
pub fn sub_item(message: &str) {
    if enabled() {
        println!("{}", format_line("INFO", &format!("    {}", message)));
    }
}

/// Print a summary section
pub fn summary(title: &str, items: &[(&str, String)]) {
    if enabled() {
        println!("{}", format_line("SUMMARY", title));
        println!("{}", format_summary(items));
    }
}

/// Align summary rows on the colon.
fn format_summary(items: &[(&str, String)]) -> String {
    let width = items.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    items
        .iter()
        .map(|(key, value)| format!("    {:<width$} : {}", key, value, width = width))
        .collect::<Vec<_>>()
        .join("\n")
}
