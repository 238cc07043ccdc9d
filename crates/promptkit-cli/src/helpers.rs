//! Shared CLI helpers — headings and status marks.

use colored::Colorize;

/// Print a bold heading surrounded by blank lines.
pub fn print_title(title: &str) {
    println!();
    println!("{}", title.cyan().bold());
    println!();
}

/// `✓` when `ok`, otherwise the given note in red.
pub fn status_mark(ok: bool, missing_note: &str) -> String {
    if ok {
        "✓".green().to_string()
    } else {
        missing_note.red().to_string()
    }
}
