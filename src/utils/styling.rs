//! Terminal styling for messages around the operations

use console::{style, Emoji};
use std::path::Path;

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "[!] ");
pub static FILE: Emoji<'_, '_> = Emoji("📂 ", "");

/// Print the tool banner
pub fn print_banner(tool: &str, version: &str) {
    println!();
    println!(
        "    {} {}",
        style(tool).cyan().bold(),
        style(format!("v{}", version)).dim()
    );
    println!("    {}", style("━".repeat(50)).dim());
}

/// Print a labelled path
pub fn print_path(label: &str, path: &Path) {
    println!("    {} {:<8} {}", FILE, label, style(path.display()).dim());
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {} {}", INFO, message);
}

/// Print a warning on stderr
pub fn print_warning(message: &str) {
    eprintln!("{} {}", WARN, style(message).yellow());
}
