//! Command handlers module.
//!
//! - `io.rs`: upload, download and convert
//! - `records.rs`: add, search and display

mod io;
mod records;

pub use io::{cmd_convert, cmd_download, cmd_upload};
pub use records::{cmd_add, cmd_display, cmd_search};

/// Maximum number of warnings printed after a command.
const MAX_WARNINGS: usize = 10;

/// Renders a capped list of warnings. Empty when there are none.
fn warning_lines(warnings: &[String]) -> Vec<String> {
    if warnings.is_empty() {
        return Vec::new();
    }
    let mut lines = vec![String::new(), format!("Warnings ({}):", warnings.len())];
    lines.extend(
        warnings
            .iter()
            .take(MAX_WARNINGS)
            .map(|warning| format!("  - {warning}")),
    );
    if warnings.len() > MAX_WARNINGS {
        lines.push(format!("  ... and {} more", warnings.len() - MAX_WARNINGS));
    }
    lines
}

/// Prints a capped list of warnings.
fn print_warnings(warnings: &[String]) {
    print_lines(&warning_lines(warnings));
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}
