//! Terminal output utilities

use console::style;

/// Width of the separator printed around each echoed command
const BANNER_WIDTH: usize = 34;

/// Print an error message to stderr
pub fn print_error(message: &str) {
    eprintln!("{}: {}", style("error").red().bold(), message);
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{}: {}", style("success").green().bold(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{}: {}", style("info").blue().bold(), message);
}

/// Print a verbose-only detail line to stderr
pub fn print_verbose(verbose: bool, message: &str) {
    if verbose {
        eprintln!("{} {}", style("   >").dim(), style(message).dim());
    }
}

/// Print `message` framed by dashed separator lines
pub fn print_banner(message: &str) {
    let rule = "-".repeat(BANNER_WIDTH);
    println!("{}", style(&rule).dim());
    println!("{}", style(message).bold());
    println!("{}", style(&rule).dim());
}

/// Format a byte count as a human readable size
pub fn format_size(size_bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = size_bytes as f64;
    let mut unit_idx = 0;

    while size >= 1024.0 && unit_idx < UNITS.len() - 1 {
        size /= 1024.0;
        unit_idx += 1;
    }

    format!("{:.2} {}", size, UNITS[unit_idx])
}
